//! Line classification and directive parsing.
//!
//! Parsing is pure: a directive is fully parsed before the model is touched,
//! so a malformed line never leaves a half-registered member behind.

use super::DirectiveError;
use crate::model::Param;

/// Syntactic kind of a source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `>.keyword ...`; value is the command starting at `.`.
    Directive(&'a str),
    /// Code fence delimiter (```).
    Fence,
    /// Markdown heading (`#`).
    Heading,
    Text,
}

impl<'a> LineKind<'a> {
    pub fn classify(line: &'a str) -> Self {
        if let Some(rest) = line.strip_prefix('>') {
            let cmd = rest.trim();
            if cmd.starts_with('.') {
                return Self::Directive(cmd);
            }
            Self::Text
        } else if line.starts_with("```") {
            Self::Fence
        } else if line.starts_with('#') {
            Self::Heading
        } else {
            Self::Text
        }
    }
}

/// What a `.end` closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndTarget {
    /// `.end`: the open method/property section.
    Section,
    /// `.end class`: the section and the current class.
    Class,
}

/// Parsed `.method` signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSig {
    pub name: String,
    pub params: Vec<Param>,
    pub version: Option<String>,
}

/// Parsed `.property` name list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyList<'a> {
    pub names: Vec<&'a str>,
    /// Shared by every name in the list.
    pub version: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive<'a> {
    Module(&'a str),
    Class(&'a str),
    Method(MethodSig),
    Property(PropertyList<'a>),
    End(EndTarget),
}

impl<'a> Directive<'a> {
    /// Parse a command such as `.method draw(*ctx*, depth=0) 1.2`.
    pub fn parse(cmd: &'a str) -> Result<Self, DirectiveError> {
        let body = cmd.strip_prefix('.').unwrap_or(cmd);
        let split = body
            .find(|c: char| c.is_whitespace() || c == '(')
            .unwrap_or(body.len());
        let (keyword, rest) = body.split_at(split);
        let rest = rest.trim();

        match keyword {
            "module" => Ok(Self::Module(require_name(cmd, rest)?)),
            "class" => Ok(Self::Class(require_name(cmd, rest)?)),
            "method" => parse_method(rest).map(Self::Method),
            "property" => parse_properties(rest).map(Self::Property),
            "end" => match rest {
                "" => Ok(Self::End(EndTarget::Section)),
                "class" => Ok(Self::End(EndTarget::Class)),
                other => Err(DirectiveError::unknown(format!("end {other}"))),
            },
            other => Err(DirectiveError::unknown(other)),
        }
    }

    /// Keyword name, for diagnostics.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Module(_) => "module",
            Self::Class(_) => "class",
            Self::Method(_) => "method",
            Self::Property(_) => "property",
            Self::End(_) => "end",
        }
    }
}

fn require_name<'a>(cmd: &str, name: &'a str) -> Result<&'a str, DirectiveError> {
    if name.is_empty() {
        return Err(DirectiveError::malformed(cmd, "missing name"));
    }
    Ok(name)
}

/// `name(args) [version]`
fn parse_method(sig: &str) -> Result<MethodSig, DirectiveError> {
    let (Some(open), Some(close)) = (sig.find('('), sig.rfind(')')) else {
        return Err(DirectiveError::malformed(sig, "expected `(args)`"));
    };
    if close < open {
        return Err(DirectiveError::malformed(sig, "expected `(args)`"));
    }

    let name = sig[..open].trim();
    if name.is_empty() {
        return Err(DirectiveError::malformed(sig, "missing method name"));
    }

    let params = split_top_level(&sig[open + 1..close])
        .into_iter()
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .map(|arg| parse_param(sig, arg))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MethodSig {
        name: name.to_string(),
        params,
        version: non_empty(sig[close + 1..].trim()).map(str::to_string),
    })
}

/// `ident`, `*ident*`, `ident=literal` or `*ident*=literal`
fn parse_param(sig: &str, arg: &str) -> Result<Param, DirectiveError> {
    let (name, default) = match arg.split_once('=') {
        Some((name, default)) => (name.trim(), non_empty(default.trim())),
        None => (arg, None),
    };

    let param = match name.strip_prefix('*') {
        Some(inner) => {
            let Some(inner) = inner.strip_suffix('*') else {
                return Err(DirectiveError::malformed(sig, "unterminated `*` marker"));
            };
            if inner.is_empty() {
                return Err(DirectiveError::malformed(sig, "empty parameter name"));
            }
            Param::positional(inner)
        }
        None if name.is_empty() => {
            return Err(DirectiveError::malformed(sig, "empty parameter name"));
        }
        None => Param::keyword(name),
    };

    Ok(match default {
        Some(default) => param.with_default(default),
        None => param,
    })
}

/// `a, b, c [version]`
fn parse_properties(list: &str) -> Result<PropertyList<'_>, DirectiveError> {
    let segments: Vec<&str> = list.split(',').map(str::trim).collect();
    let last = segments.len() - 1;
    let mut names = Vec::with_capacity(segments.len());
    let mut version = None;

    for (i, segment) in segments.iter().enumerate() {
        let (name, tail) = match segment.split_once(char::is_whitespace) {
            Some((name, tail)) => (name, non_empty(tail.trim())),
            None => (*segment, None),
        };
        if name.is_empty() {
            return Err(DirectiveError::malformed(list, "empty property name"));
        }
        if tail.is_some() && i != last {
            return Err(DirectiveError::malformed(
                list,
                "version tag must follow the last property",
            ));
        }
        names.push(name);
        version = version.or(tail);
    }

    Ok(PropertyList { names, version })
}

/// Split on commas not nested in brackets or quotes.
fn split_top_level(args: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, ch) in args.char_indices() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '(' | '[' | '{') => depth += 1,
            (None, ')' | ']' | '}') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                parts.push(&args[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&args[start..]);
    parts
}

#[inline]
fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(cmd: &str) -> MethodSig {
        match Directive::parse(cmd).unwrap() {
            Directive::Method(sig) => sig,
            other => panic!("expected method, got {other:?}"),
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            LineKind::classify(">.module app"),
            LineKind::Directive(".module app")
        );
        assert_eq!(LineKind::classify(">  .end  "), LineKind::Directive(".end"));
        assert_eq!(LineKind::classify("> quoted text"), LineKind::Text);
        assert_eq!(LineKind::classify("```python"), LineKind::Fence);
        assert_eq!(LineKind::classify("## Methods"), LineKind::Heading);
        assert_eq!(LineKind::classify(" # indented"), LineKind::Text);
        assert_eq!(LineKind::classify(""), LineKind::Text);
    }

    #[test]
    fn test_parse_module_and_class() {
        assert_eq!(
            Directive::parse(".module app").unwrap(),
            Directive::Module("app")
        );
        assert_eq!(
            Directive::parse(".class  Box ").unwrap(),
            Directive::Class("Box")
        );
        assert!(matches!(
            Directive::parse(".module"),
            Err(DirectiveError::MalformedSignature { .. })
        ));
    }

    #[test]
    fn test_parse_end() {
        assert_eq!(
            Directive::parse(".end").unwrap(),
            Directive::End(EndTarget::Section)
        );
        assert_eq!(
            Directive::parse(".end class").unwrap(),
            Directive::End(EndTarget::Class)
        );
        assert_eq!(
            Directive::parse(".end module"),
            Err(DirectiveError::unknown("end module"))
        );
    }

    #[test]
    fn test_unknown_keyword() {
        assert_eq!(
            Directive::parse(".function foo()"),
            Err(DirectiveError::unknown("function"))
        );
        // Keywords must match exactly
        assert!(matches!(
            Directive::parse(".classes Foo"),
            Err(DirectiveError::UnknownDirective { .. })
        ));
    }

    #[test]
    fn test_method_params() {
        let sig = method(".method draw(*ctx*, depth=0, *mode*='fast')");
        assert_eq!(sig.name, "draw");
        assert_eq!(
            sig.params,
            vec![
                Param::positional("ctx"),
                Param::keyword("depth").with_default("0"),
                Param::positional("mode").with_default("'fast'"),
            ]
        );
        assert_eq!(sig.version, None);
    }

    #[test]
    fn test_method_version() {
        let sig = method(".method close() 1.4");
        assert!(sig.params.is_empty());
        assert_eq!(sig.version.as_deref(), Some("1.4"));
    }

    #[test]
    fn test_method_name_required() {
        assert!(Directive::parse(".method(x)").is_err());
        assert!(Directive::parse(".method (x)").is_err());
        assert_eq!(method(".method  open (path)").name, "open");
    }

    #[test]
    fn test_method_nested_default() {
        let sig = method(".method move(to=(0, 0), tags=['a, b'], *rest*)");
        assert_eq!(
            sig.params,
            vec![
                Param::keyword("to").with_default("(0, 0)"),
                Param::keyword("tags").with_default("['a, b']"),
                Param::positional("rest"),
            ]
        );
    }

    #[test]
    fn test_method_unterminated_marker() {
        assert_eq!(
            Directive::parse(".method foo(*bad)"),
            Err(DirectiveError::malformed("foo(*bad)", "unterminated `*` marker"))
        );
    }

    #[test]
    fn test_method_missing_parens() {
        assert!(matches!(
            Directive::parse(".method foo"),
            Err(DirectiveError::MalformedSignature { .. })
        ));
        assert!(matches!(
            Directive::parse(".method foo)("),
            Err(DirectiveError::MalformedSignature { .. })
        ));
    }

    #[test]
    fn test_method_skips_empty_args() {
        let sig = method(".method f(a, , b,)");
        assert_eq!(sig.params, vec![Param::keyword("a"), Param::keyword("b")]);
    }

    #[test]
    fn test_properties_shared_version() {
        let list = match Directive::parse(".property a, b 2.0").unwrap() {
            Directive::Property(list) => list,
            other => panic!("expected property, got {other:?}"),
        };
        assert_eq!(list.names, vec!["a", "b"]);
        assert_eq!(list.version, Some("2.0"));
    }

    #[test]
    fn test_single_property() {
        let list = PropertyList {
            names: vec!["width"],
            version: None,
        };
        assert_eq!(
            Directive::parse(".property width").unwrap(),
            Directive::Property(list)
        );
    }

    #[test]
    fn test_properties_misplaced_version() {
        assert!(matches!(
            Directive::parse(".property a 1.0, b"),
            Err(DirectiveError::MalformedSignature { .. })
        ));
        assert!(matches!(
            Directive::parse(".property a,,b"),
            Err(DirectiveError::MalformedSignature { .. })
        ));
    }

    #[test]
    fn test_split_top_level() {
        assert_eq!(split_top_level("a, b"), vec!["a", " b"]);
        assert_eq!(split_top_level("f(a, b), c"), vec!["f(a, b)", " c"]);
        assert_eq!(split_top_level("\"x,y\""), vec!["\"x,y\""]);
        assert_eq!(split_top_level(""), vec![""]);
    }
}
