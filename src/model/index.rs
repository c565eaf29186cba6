//! Read-only view of a fully populated model.

use std::ops::Deref;

use super::{ApiModel, ClassId, Container, MemberId};

/// Frozen object model handed to the link pass.
///
/// Only obtainable through [`ApiModel::freeze`], so holding one proves the
/// directive pass has finished for every page.
#[derive(Debug)]
pub struct ApiIndex {
    model: ApiModel,
}

impl ApiIndex {
    pub(super) fn new(model: ApiModel) -> Self {
        Self { model }
    }

    /// Find a container for a `#Container.Member` reference: classes first, then modules.
    pub fn container(&self, name: &str) -> Option<Container> {
        self.model
            .class_id(name)
            .map(Container::Class)
            .or_else(|| self.model.module_id(name).map(Container::Module))
    }

    /// Find a class for a bare `#Name` reference.
    pub fn find_class(&self, name: &str) -> Option<ClassId> {
        self.model.class_id(name)
    }

    /// Find a member of a container: methods first, then properties.
    pub fn find_member(&self, container: Container, name: &str) -> Option<MemberId> {
        self.model.members_of(container).get(name)
    }
}

impl Deref for ApiIndex {
    type Target = ApiModel;

    fn deref(&self) -> &ApiModel {
        &self.model
    }
}
