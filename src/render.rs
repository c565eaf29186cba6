//! HTML stubs for API members.
//!
//! Every stub is a heading followed by an opened `<div class="api">` body.
//! The body is closed later with [`CLOSE_TAG`] by the directive processor.
//!
//! ```text
//! <h3 id="Widget_render" class="api">
//!   <span class="prefix">Widget.</span><span class="name">render</span>
//!   <span class="paren">(</span><i>ctx</i>, depth=<span class="default">0</span>
//!   <span class="paren">)</span>
//!   <del>1.2</del>
//! </h3>
//! <div class="api" markdown="1">
//! ```
//!
//! (Shown wrapped; the real stub is a single line.)

use crate::model::{ApiModel, Container, MemberId, Param};

/// Closes the body opened by a stub.
pub const CLOSE_TAG: &str = "</div>";

/// Opens the body of a stub.
const OPEN_BODY: &str = r#"<div class="api" markdown="1">"#;

/// Anchor emitted for a `.class` directive.
///
/// The visible heading is written by the author in the surrounding prose.
pub fn render_class_anchor(name: &str) -> String {
    format!(r#"<a id="{name}"></a>"#)
}

/// Render the stub for a method or property.
pub fn render_member(model: &ApiModel, id: MemberId) -> String {
    let member = model.member(id);
    let mut buf = format!(
        r#"<h3 id="{}" class="api"><span class="prefix">{}.</span><span class="name">{}</span>"#,
        model.member_anchor(id),
        display_prefix(model, id),
        member.name,
    );

    if member.is_method() {
        buf.push_str(r#"<span class="paren">(</span>"#);
        push_params(&mut buf, member.params());
        buf.push_str(r#"<span class="paren">)</span>"#);
    }

    if let Some(version) = &member.version {
        buf.push_str(&format!("<del>{version}</del>"));
    }

    buf.push_str("</h3>");
    buf.push_str(OPEN_BODY);
    buf
}

/// Prefix shown before the member name.
///
/// A constructor (member named like its class) is shown as `Module.Class`.
fn display_prefix(model: &ApiModel, id: MemberId) -> &str {
    let member = model.member(id);
    match member.parent {
        Container::Class(c) => {
            let class = model.class(c);
            if member.name == class.name {
                &model.module(class.module).name
            } else {
                &class.name
            }
        }
        Container::Module(m) => &model.module(m).name,
    }
}

fn push_params(buf: &mut String, params: &[Param]) {
    for (i, param) in params.iter().enumerate() {
        if i > 0 {
            buf.push_str(", ");
        }
        if param.positional {
            buf.push_str(&format!("<i>{}</i>", param.name));
        } else {
            buf.push_str(&param.name);
        }
        if let Some(default) = &param.default {
            buf.push_str(&format!(r#"=<span class="default">{default}</span>"#));
        }
    }
}
