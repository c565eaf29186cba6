//! API entities and their typed ids.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::page::PagePath;

/// Index of a [`Module`] in the model arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModuleId(pub(super) usize);

/// Index of a [`Class`] in the model arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId(pub(super) usize);

/// Index of a [`Member`] in the model arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberId(pub(super) usize);

/// An entity able to own methods and properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    Module(ModuleId),
    Class(ClassId),
}

/// Name-keyed member tables shared by modules and classes.
#[derive(Debug, Default)]
pub struct Members {
    pub methods: FxHashMap<String, MemberId>,
    pub properties: FxHashMap<String, MemberId>,
}

impl Members {
    /// Look up a member by name, methods first.
    pub fn get(&self, name: &str) -> Option<MemberId> {
        self.methods
            .get(name)
            .or_else(|| self.properties.get(name))
            .copied()
    }
}

/// Top-level API unit, shared across every page that names it.
#[derive(Debug)]
pub struct Module {
    pub name: String,
    /// Page that first declared the module.
    pub page: PagePath,
    pub classes: FxHashMap<String, ClassId>,
    pub members: Members,
}

/// Class, addressable by bare name across the whole site.
#[derive(Debug)]
pub struct Class {
    pub name: String,
    /// Page that first declared the class; target of `#Class` links.
    pub page: PagePath,
    /// Owning module, fixed by the first declaration.
    pub module: ModuleId,
    pub members: Members,
}

/// Method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: String,
    /// Written as `*name*`: rendered in italics.
    pub positional: bool,
    /// Default literal, kept as source text.
    pub default: Option<String>,
}

impl Param {
    pub fn keyword(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            positional: false,
            default: None,
        }
    }

    pub fn positional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            positional: true,
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberKind {
    Method { params: Vec<Param> },
    Property,
}

/// Method or property owned by exactly one container.
#[derive(Debug)]
pub struct Member {
    pub name: String,
    /// Page the member is documented on.
    pub page: PagePath,
    pub parent: Container,
    /// Deprecation version tag.
    pub version: Option<String>,
    pub kind: MemberKind,
}

impl Member {
    #[inline]
    pub fn is_method(&self) -> bool {
        matches!(self.kind, MemberKind::Method { .. })
    }

    pub fn params(&self) -> &[Param] {
        match &self.kind {
            MemberKind::Method { params } => params,
            MemberKind::Property => &[],
        }
    }
}
