//! Object model of the documented API surface.
//!
//! Entities live in arenas and refer to each other through typed ids, so
//! back-references (member → container, class → module) need no shared
//! ownership.
//!
//! # Lifecycle
//!
//! ```text
//! ApiModel (mutable, directive pass)
//!     └── freeze() → ApiIndex (read-only, link pass)
//! ```
//!
//! Class names form one global namespace: two modules declaring a class
//! with the same name share a single [`Class`], owned by whichever module
//! declared it first.

mod entity;
mod index;

pub use entity::{
    Class, ClassId, Container, Member, MemberId, MemberKind, Members, Module, ModuleId, Param,
};
pub use index::ApiIndex;

use rustc_hash::FxHashMap;

use crate::page::PagePath;

/// Anchor id of a member: `Class_member` inside a class, `member` inside a module.
///
/// Shared by the stub renderer and the link resolver so emitted ids and
/// resolved links always agree.
pub fn anchor_id(class: Option<&str>, member: &str) -> String {
    match class {
        Some(class) => format!("{class}_{member}"),
        None => member.to_string(),
    }
}

/// Mutable registries populated by the directive pass.
#[derive(Debug, Default)]
pub struct ApiModel {
    modules: Vec<Module>,
    classes: Vec<Class>,
    members: Vec<Member>,
    module_names: FxHashMap<String, ModuleId>,
    class_names: FxHashMap<String, ClassId>,
}

impl ApiModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish the directive pass. The returned index is read-only.
    pub fn freeze(self) -> ApiIndex {
        ApiIndex::new(self)
    }

    // ------------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------------

    /// Get or create a module by name.
    pub fn module_or_insert(&mut self, name: &str, page: &PagePath) -> ModuleId {
        if let Some(&id) = self.module_names.get(name) {
            return id;
        }
        let id = ModuleId(self.modules.len());
        self.modules.push(Module {
            name: name.to_string(),
            page: page.clone(),
            classes: FxHashMap::default(),
            members: Members::default(),
        });
        self.module_names.insert(name.to_string(), id);
        id
    }

    /// Get or create a class by name.
    ///
    /// An existing class keeps the module and page of its first declaration.
    pub fn class_or_insert(&mut self, name: &str, module: ModuleId, page: &PagePath) -> ClassId {
        if let Some(&id) = self.class_names.get(name) {
            return id;
        }
        let id = ClassId(self.classes.len());
        self.classes.push(Class {
            name: name.to_string(),
            page: page.clone(),
            module,
            members: Members::default(),
        });
        self.class_names.insert(name.to_string(), id);
        self.modules[module.0].classes.insert(name.to_string(), id);
        id
    }

    /// Add a method, replacing any method of the same name in `parent`.
    pub fn add_method(
        &mut self,
        parent: Container,
        name: &str,
        page: &PagePath,
        version: Option<String>,
        params: Vec<Param>,
    ) -> MemberId {
        self.add_member(parent, name, page, version, MemberKind::Method { params })
    }

    /// Add a property, replacing any property of the same name in `parent`.
    pub fn add_property(
        &mut self,
        parent: Container,
        name: &str,
        page: &PagePath,
        version: Option<String>,
    ) -> MemberId {
        self.add_member(parent, name, page, version, MemberKind::Property)
    }

    fn add_member(
        &mut self,
        parent: Container,
        name: &str,
        page: &PagePath,
        version: Option<String>,
        kind: MemberKind,
    ) -> MemberId {
        let id = MemberId(self.members.len());
        let is_method = matches!(kind, MemberKind::Method { .. });
        self.members.push(Member {
            name: name.to_string(),
            page: page.clone(),
            parent,
            version,
            kind,
        });

        let members = self.members_mut(parent);
        let table = if is_method {
            &mut members.methods
        } else {
            &mut members.properties
        };
        table.insert(name.to_string(), id);
        id
    }

    fn members_mut(&mut self, container: Container) -> &mut Members {
        match container {
            Container::Module(id) => &mut self.modules[id.0].members,
            Container::Class(id) => &mut self.classes[id.0].members,
        }
    }

    // ------------------------------------------------------------------------
    // Access
    // ------------------------------------------------------------------------

    #[inline]
    pub fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id.0]
    }

    #[inline]
    pub fn class(&self, id: ClassId) -> &Class {
        &self.classes[id.0]
    }

    #[inline]
    pub fn member(&self, id: MemberId) -> &Member {
        &self.members[id.0]
    }

    pub fn module_id(&self, name: &str) -> Option<ModuleId> {
        self.module_names.get(name).copied()
    }

    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.class_names.get(name).copied()
    }

    pub fn modules(&self) -> impl Iterator<Item = (ModuleId, &Module)> {
        self.modules
            .iter()
            .enumerate()
            .map(|(i, m)| (ModuleId(i), m))
    }

    pub fn members_of(&self, container: Container) -> &Members {
        match container {
            Container::Module(id) => &self.module(id).members,
            Container::Class(id) => &self.class(id).members,
        }
    }

    /// Anchor id of a member, as emitted in its stub.
    pub fn member_anchor(&self, id: MemberId) -> String {
        let member = self.member(id);
        let class = match member.parent {
            Container::Class(c) => Some(self.class(c).name.as_str()),
            Container::Module(_) => None,
        };
        anchor_id(class, &member.name)
    }

    /// Number of (modules, classes, members) ever registered.
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.modules.len(), self.classes.len(), self.members.len())
    }
}
