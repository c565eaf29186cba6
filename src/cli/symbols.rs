//! Symbols command: dump the documented API as JSON.
//!
//! Runs the directive pass only; pages are never written.

use std::fs;
use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::SymbolsArgs;
use crate::config::ApiRefConfig;
use crate::log;
use crate::model::{ApiIndex, Container, MemberId, Members, Param};
use crate::page::{PagePath, PageStore};
use crate::pipeline;
use crate::utils::plural_count;

#[derive(Debug, Serialize)]
pub struct ModuleEntry<'a> {
    pub name: &'a str,
    pub page: &'a PagePath,
    pub classes: Vec<ClassEntry<'a>>,
    pub members: Vec<MemberEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ClassEntry<'a> {
    pub name: &'a str,
    /// Resolved link target for `#Class`.
    pub link: String,
    pub members: Vec<MemberEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub struct MemberEntry<'a> {
    pub name: &'a str,
    pub kind: &'static str,
    /// Resolved link target for `#Container.member`.
    ///
    /// Absent for a property shadowed by a method of the same name: links
    /// to that name always reach the method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub shadowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<&'a str>,
    /// Absent for properties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<&'a [Param]>,
}

/// Execute symbols command
pub fn run_symbols(config: &ApiRefConfig, args: &SymbolsArgs) -> Result<()> {
    let mut store = PageStore::load(&config.build.source, &config.build.extensions)?;
    let (index, _) = pipeline::process_all(store.pages_mut())
        .context("directive processing failed")?;

    let modules = collect_modules(&index);
    log!("symbols"; "found {}", plural_count(modules.len(), "module"));

    let formatted = if args.pretty {
        serde_json::to_string_pretty(&modules)?
    } else {
        serde_json::to_string(&modules)?
    };

    if let Some(ref output_path) = args.output {
        let mut file = fs::File::create(output_path)
            .with_context(|| format!("failed to create `{}`", output_path.display()))?;
        writeln!(file, "{}", formatted)?;
        log!("symbols"; "wrote output to {}", output_path.display());
    } else {
        println!("{}", formatted);
    }

    Ok(())
}

/// Every module with its classes and members, sorted by name.
pub fn collect_modules(index: &ApiIndex) -> Vec<ModuleEntry<'_>> {
    let mut modules: Vec<_> = index
        .modules()
        .map(|(id, module)| {
            let mut classes: Vec<_> = module
                .classes
                .values()
                .map(|&c| {
                    let class = index.class(c);
                    ClassEntry {
                        name: &class.name,
                        link: class.page.with_fragment(&class.name),
                        members: collect_members(index, &class.members),
                    }
                })
                .collect();
            classes.sort_by(|a, b| a.name.cmp(b.name));

            ModuleEntry {
                name: &module.name,
                page: &module.page,
                classes,
                members: collect_members(index, index.members_of(Container::Module(id))),
            }
        })
        .collect();
    modules.sort_by(|a, b| a.name.cmp(b.name));
    modules
}

fn collect_members<'a>(index: &'a ApiIndex, members: &'a Members) -> Vec<MemberEntry<'a>> {
    let methods = members
        .methods
        .values()
        .map(|&id| member_entry(index, id, false));
    let properties = members
        .properties
        .iter()
        .map(|(name, &id)| member_entry(index, id, members.methods.contains_key(name)));

    let mut entries: Vec<_> = methods.chain(properties).collect();
    entries.sort_by(|a, b| (a.kind, a.name).cmp(&(b.kind, b.name)));
    entries
}

fn member_entry(index: &ApiIndex, id: MemberId, shadowed: bool) -> MemberEntry<'_> {
    let member = index.member(id);
    let kind = if member.is_method() {
        "method"
    } else {
        "property"
    };
    let link = if shadowed {
        None
    } else {
        Some(member.page.with_fragment(&index.member_anchor(id)))
    };

    MemberEntry {
        name: &member.name,
        kind,
        link,
        shadowed,
        version: member.version.as_deref(),
        params: member.is_method().then(|| member.params()),
    }
}
