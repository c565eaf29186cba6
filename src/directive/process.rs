//! Directive pass: rewrite directive lines and populate the model.

use super::parse::{Directive, EndTarget, LineKind};
use super::state::{OpenSection, ScanState};
use super::{DirectiveError, PageError};
use crate::model::ApiModel;
use crate::page::{Page, PagePath};
use crate::render::{render_class_anchor, render_member};
use crate::{debug, log};

/// Counters for one or more processed pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessStats {
    /// Directive lines rewritten.
    pub directives: usize,
    /// Method/property stubs emitted.
    pub stubs: usize,
}

impl std::ops::AddAssign for ProcessStats {
    fn add_assign(&mut self, rhs: Self) {
        self.directives += rhs.directives;
        self.stubs += rhs.stubs;
    }
}

/// Runs the directive state machine over pages, filling one [`ApiModel`].
pub struct DirectiveProcessor<'m> {
    model: &'m mut ApiModel,
}

impl<'m> DirectiveProcessor<'m> {
    pub fn new(model: &'m mut ApiModel) -> Self {
        Self { model }
    }

    /// Rewrite one page in place.
    ///
    /// Stops at the first directive error; the page's lines are left as they were.
    pub fn process_page(&mut self, page: &mut Page) -> Result<ProcessStats, PageError> {
        let mut state = ScanState::new();
        let mut stats = ProcessStats::default();
        let mut out = Vec::with_capacity(page.lines.len());

        for (i, line) in page.lines.iter().enumerate() {
            match LineKind::classify(line) {
                LineKind::Directive(cmd) => {
                    let html = self
                        .apply(&mut state, page.path(), cmd, &mut stats)
                        .map_err(|error| PageError {
                            page: page.path().clone(),
                            line: i + 1,
                            error,
                        })?;
                    stats.directives += 1;
                    out.push(html);
                    continue;
                }
                LineKind::Fence => state.toggle_fence(),
                LineKind::Heading => {
                    if let Some(tag) = state.on_heading() {
                        out.push(tag.to_string());
                    }
                }
                LineKind::Text => {}
            }
            out.push(line.trim_end().to_string());
        }

        page.lines = out;
        Ok(stats)
    }

    /// Apply one directive, returning the line that replaces it.
    fn apply(
        &mut self,
        state: &mut ScanState,
        page: &PagePath,
        cmd: &str,
        stats: &mut ProcessStats,
    ) -> Result<String, DirectiveError> {
        let directive = Directive::parse(cmd)?;
        debug!("directive"; "{} .{}", page, directive.keyword());

        match directive {
            Directive::Module(name) => {
                state.open_module = Some(self.model.module_or_insert(name, page));
                Ok(String::new())
            }

            Directive::Class(name) => {
                let module = state
                    .open_module
                    .ok_or(DirectiveError::missing_context("class"))?;
                let id = self.model.class_or_insert(name, module, page);

                let owner = self.model.class(id).module;
                if owner != module {
                    log!("warning"; "{}: class `{}` already declared in module `{}`, sharing it",
                        page, name, self.model.module(owner).name);
                }

                state.open_class = Some(id);
                Ok(render_class_anchor(name))
            }

            Directive::Method(sig) => {
                let parent = state
                    .container()
                    .ok_or(DirectiveError::missing_context("method"))?;
                let id = self
                    .model
                    .add_method(parent, &sig.name, page, sig.version, sig.params);

                let mut html = state.close_section().unwrap_or_default().to_string();
                html.push_str(&render_member(self.model, id));
                state.open_section = OpenSection::Method(id);
                stats.stubs += 1;
                Ok(html)
            }

            Directive::Property(list) => {
                let parent = state
                    .container()
                    .ok_or(DirectiveError::missing_context("property"))?;

                let mut html = state.close_section().unwrap_or_default().to_string();
                for name in list.names {
                    let version = list.version.map(str::to_string);
                    let id = self.model.add_property(parent, name, page, version);
                    html.push_str(&render_member(self.model, id));
                    state.open_section = OpenSection::Property(id);
                    stats.stubs += 1;
                }
                Ok(html)
            }

            Directive::End(EndTarget::Section) => {
                Ok(state.close_section().unwrap_or_default().to_string())
            }

            Directive::End(EndTarget::Class) => {
                Ok(state.end_class().unwrap_or_default().to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Container;
    use crate::render::CLOSE_TAG;

    fn page(path: &str, src: &[&str]) -> Page {
        Page::new(path, src.iter().map(|s| s.to_string()).collect())
    }

    fn run(model: &mut ApiModel, page: &mut Page) -> Result<ProcessStats, PageError> {
        DirectiveProcessor::new(model).process_page(page)
    }

    #[test]
    fn test_plain_lines_pass_through_trimmed() {
        let mut model = ApiModel::new();
        let mut p = page("/a", &["# Title  ", "text \t", "> quote", ""]);
        let stats = run(&mut model, &mut p).unwrap();

        assert_eq!(p.lines, vec!["# Title", "text", "> quote", ""]);
        assert_eq!(stats, ProcessStats::default());
    }

    #[test]
    fn test_module_and_class_lines() {
        let mut model = ApiModel::new();
        let mut p = page("/a", &[">.module app", ">.class Box", "Boxes things."]);
        run(&mut model, &mut p).unwrap();

        assert_eq!(p.lines, vec!["", r#"<a id="Box"></a>"#, "Boxes things."]);
        let class = model.class(model.class_id("Box").unwrap());
        assert_eq!(model.module(class.module).name, "app");
    }

    #[test]
    fn test_second_method_closes_first_once() {
        let mut model = ApiModel::new();
        let src = [
            ">.module app",
            ">.method one()",
            "first",
            ">.method two()",
            "second",
            ">.end",
        ];
        let mut p = page("/a", &src);
        let stats = run(&mut model, &mut p).unwrap();

        assert!(!p.lines[1].starts_with(CLOSE_TAG));
        assert!(p.lines[3].starts_with(CLOSE_TAG));
        assert_eq!(p.lines[3].matches(CLOSE_TAG).count(), 1);
        assert!(p.lines[3][CLOSE_TAG.len()..].starts_with(r#"<h3 id="two""#));
        assert_eq!(p.lines[5], CLOSE_TAG);
        assert_eq!(stats.directives, 4);
        assert_eq!(stats.stubs, 2);
    }

    #[test]
    fn test_property_list_shares_version_and_close() {
        let mut model = ApiModel::new();
        let src = [
            ">.module app",
            ">.class Box",
            ">.method open()",
            ">.property a, b 2.0",
        ];
        let mut p = page("/a", &src);
        run(&mut model, &mut p).unwrap();

        let line = &p.lines[3];
        assert!(line.starts_with(CLOSE_TAG));
        assert_eq!(line.matches(CLOSE_TAG).count(), 1);
        assert_eq!(line.matches("<del>2.0</del>").count(), 2);
        let a = line.find(r#"id="Box_a""#).unwrap();
        let b = line.find(r#"id="Box_b""#).unwrap();
        assert!(a < b);

        let class = Container::Class(model.class_id("Box").unwrap());
        for name in ["a", "b"] {
            let id = model.members_of(class).get(name).unwrap();
            assert_eq!(model.member(id).version.as_deref(), Some("2.0"));
        }
    }

    #[test]
    fn test_heading_closes_section() {
        let mut model = ApiModel::new();
        let src = [">.module app", ">.property debug", "## Next", "## Again"];
        let mut p = page("/a", &src);
        run(&mut model, &mut p).unwrap();

        assert_eq!(p.lines[2], CLOSE_TAG);
        assert_eq!(p.lines[3], "## Next");
        assert_eq!(p.lines[4], "## Again");
        assert_eq!(p.lines.len(), 5);
    }

    #[test]
    fn test_heading_in_fence_keeps_section() {
        let mut model = ApiModel::new();
        let src = [
            ">.module app",
            ">.method run()",
            "```python",
            "# comment",
            "```",
            "# Heading",
        ];
        let mut p = page("/a", &src);
        run(&mut model, &mut p).unwrap();

        assert_eq!(
            &p.lines[2..],
            &["```python", "# comment", "```", CLOSE_TAG, "# Heading"]
        );
    }

    #[test]
    fn test_end_class_falls_back_to_module() {
        let mut model = ApiModel::new();
        let src = [
            ">.module app",
            ">.class Box",
            ">.end class",
            ">.method run()",
        ];
        let mut p = page("/a", &src);
        run(&mut model, &mut p).unwrap();

        assert_eq!(p.lines[2], "");
        let app = Container::Module(model.module_id("app").unwrap());
        assert!(model.members_of(app).get("run").is_some());
        let stub = r#"<h3 id="run" class="api"><span class="prefix">app.</span>"#;
        assert!(p.lines[3].starts_with(stub));
    }

    #[test]
    fn test_constructor_stub() {
        let mut model = ApiModel::new();
        let src = [">.module App", ">.class Box", ">.method Box(size)"];
        let mut p = page("/a", &src);
        run(&mut model, &mut p).unwrap();

        assert!(p.lines[2].contains(r#"id="Box_Box""#));
        assert!(p.lines[2].contains(r#"<span class="prefix">App.</span>"#));
    }

    #[test]
    fn test_missing_context() {
        let mut model = ApiModel::new();
        let mut p = page("/a", &["intro", ">.method run()"]);
        let err = run(&mut model, &mut p).unwrap_err();

        assert_eq!(err.line, 2);
        assert_eq!(err.error, DirectiveError::missing_context("method"));
        assert_eq!(p.lines, vec!["intro", ">.method run()"]);
    }

    #[test]
    fn test_class_without_module() {
        let mut model = ApiModel::new();
        let mut p = page("/a", &[">.class Box"]);
        let err = run(&mut model, &mut p).unwrap_err();

        assert_eq!(err.error, DirectiveError::missing_context("class"));
        assert_eq!(model.counts(), (0, 0, 0));
    }

    #[test]
    fn test_malformed_signature_leaves_model_untouched() {
        let mut model = ApiModel::new();
        let mut p = page("/a", &[">.module app", ">.method foo(*bad)"]);
        let err = run(&mut model, &mut p).unwrap_err();

        assert!(matches!(err.error, DirectiveError::MalformedSignature { .. }));
        assert_eq!(model.counts(), (1, 0, 0));
    }

    #[test]
    fn test_unknown_directive() {
        let mut model = ApiModel::new();
        let mut p = page("/a", &[">.function foo()"]);
        let err = run(&mut model, &mut p).unwrap_err();

        assert_eq!(err.error, DirectiveError::unknown("function"));
    }

    #[test]
    fn test_state_does_not_leak_between_pages() {
        let mut model = ApiModel::new();
        let mut a = page("/a", &[">.module app", ">.method run()"]);
        let mut b = page("/b", &[">.property orphan"]);

        let mut processor = DirectiveProcessor::new(&mut model);
        processor.process_page(&mut a).unwrap();
        let err = processor.process_page(&mut b).unwrap_err();
        assert_eq!(err.page, "/b");
    }

    #[test]
    fn test_module_spans_pages() {
        let mut model = ApiModel::new();
        let mut a = page("/a", &[">.module app", ">.method one()"]);
        let mut b = page("/b", &[">.module app", ">.method two()"]);

        let mut processor = DirectiveProcessor::new(&mut model);
        processor.process_page(&mut a).unwrap();
        processor.process_page(&mut b).unwrap();

        let app = Container::Module(model.module_id("app").unwrap());
        let two = model.members_of(app).get("two").unwrap();
        assert_eq!(model.member(two).page, "/b");
        assert!(model.members_of(app).get("one").is_some());
    }
}
