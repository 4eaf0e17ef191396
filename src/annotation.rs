//! @ai:module:intent Read JSDoc tags attached to a function declaration
//! @ai:module:layer domain
//! @ai:module:public_api DocTag, ParamTag, DocTags, parse_tags, read_tags
//! @ai:module:stateless true

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static TAG_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([A-Za-z_][\w-]*)\s*(.*)$").expect("Invalid regex"));

const CANCELABLE: &str = "cancelable";
const ANY: &str = "any";

/// @ai:intent One recognized JSDoc tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocTag {
    CustomFunction,
    HelpUrl(String),
    Volatile,
    Streaming { cancelable: bool },
    Return { type_text: Option<String> },
    Param(ParamTag),
    Unknown(String),
}

/// @ai:intent A `@param` tag split into its parts
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParamTag {
    pub name: String,
    /// Text inside the braces, case-preserved
    pub type_text: Option<String>,
    /// `[name]` or `[name=default]`
    pub bracketed: bool,
    pub description: String,
}

/// @ai:intent Folded view of every tag on a declaration, with documented defaults
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocTags {
    pub description: String,
    pub help_url: String,
    pub custom_function: bool,
    pub volatile: bool,
    pub streaming: bool,
    pub cancelable: bool,
    pub return_type: Option<String>,
    pub params: HashMap<String, ParamTag>,
}

impl DocTag {
    /// @ai:intent Recognize a tag from its name and the text that follows it
    /// @ai:example ("CustomFunction", "") -> CustomFunction
    /// @ai:example ("streaming", "Cancelable") -> Streaming { cancelable: true }
    /// @ai:effects pure
    pub fn parse(name: &str, body: &str) -> Self {
        match name.to_lowercase().as_str() {
            "customfunction" => DocTag::CustomFunction,
            "helpurl" => DocTag::HelpUrl(body.trim().to_string()),
            "volatile" => DocTag::Volatile,
            "streaming" => DocTag::Streaming {
                cancelable: body.trim().to_lowercase() == CANCELABLE,
            },
            "return" | "returns" => DocTag::Return {
                type_text: take_braced(body.trim()).map(|(inner, _)| inner.to_string()),
            },
            "param" | "arg" | "argument" => DocTag::Param(parse_param(body)),
            other => DocTag::Unknown(other.to_string()),
        }
    }
}

impl DocTags {
    /// @ai:intent Comment type for a parameter, `any` when the tag has no braces
    /// @ai:post None when there is no tag for the parameter at all
    pub fn param_type(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .map(|tag| tag.type_text.as_deref().unwrap_or(ANY))
    }

    /// @ai:intent Description for a parameter; None when there is no tag for it
    pub fn param_description(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(|tag| tag.description.as_str())
    }

    /// @ai:intent Whether a parameter is declared optional via `[name]`
    pub fn param_bracketed(&self, name: &str) -> bool {
        self.params.get(name).is_some_and(|tag| tag.bracketed)
    }

    /// @ai:intent Comment return type, `any` when no return tag carries one
    pub fn return_type(&self) -> &str {
        self.return_type.as_deref().unwrap_or(ANY)
    }

    fn apply(&mut self, tag: DocTag) {
        match tag {
            DocTag::CustomFunction => self.custom_function = true,
            DocTag::HelpUrl(url) => {
                if !url.is_empty() {
                    self.help_url = url;
                }
            }
            DocTag::Volatile => self.volatile = true,
            DocTag::Streaming { cancelable } => {
                self.streaming = true;
                self.cancelable |= cancelable;
            }
            DocTag::Return { type_text } => {
                if type_text.is_some() {
                    self.return_type = type_text;
                }
            }
            DocTag::Param(param) => {
                self.params.insert(param.name.clone(), param);
            }
            DocTag::Unknown(_) => {}
        }
    }
}

/// @ai:intent Read every JSDoc block of a declaration into one folded view
/// @ai:post description comes from the first block only; tags from all blocks
/// @ai:effects pure
pub fn read_tags(blocks: &[String]) -> DocTags {
    let mut tags = DocTags::default();

    for (idx, block) in blocks.iter().enumerate() {
        let (description, parsed) = parse_block(block);
        if idx == 0 {
            tags.description = description;
        }
        for tag in parsed {
            tags.apply(tag);
        }
    }

    tags
}

/// @ai:intent Parse the tags of a single block in order, ignoring the description
/// @ai:effects pure
pub fn parse_tags(block: &str) -> Vec<DocTag> {
    parse_block(block).1
}

fn parse_block(block: &str) -> (String, Vec<DocTag>) {
    let mut description: Vec<&str> = Vec::new();
    let mut tags = Vec::new();
    let mut current: Option<(&str, Vec<&str>)> = None;

    for line in block_lines(block) {
        if let Some(captures) = TAG_LINE.captures(line) {
            if let Some((name, body)) = current.take() {
                tags.push(DocTag::parse(name, &body.join("\n")));
            }
            let name = captures.get(1).map_or("", |m| m.as_str());
            let body = captures.get(2).map_or("", |m| m.as_str());
            current = Some((name, vec![body]));
            continue;
        }

        match &mut current {
            Some((_, body)) => body.push(line),
            None => description.push(line),
        }
    }

    if let Some((name, body)) = current {
        tags.push(DocTag::parse(name, &body.join("\n")));
    }

    (description.join("\n").trim().to_string(), tags)
}

/// @ai:intent Strip the comment delimiters and leading asterisks from each line
/// @ai:effects pure
fn block_lines(block: &str) -> impl Iterator<Item = &str> {
    let inner = block.trim();
    let inner = inner.strip_prefix("/**").unwrap_or(inner);
    let inner = inner.strip_suffix("*/").unwrap_or(inner);

    inner.lines().map(|line| {
        let line = line.trim();
        line.strip_prefix('*').unwrap_or(line).trim()
    })
}

/// @ai:intent Split `{type} [name=default] - description` into a ParamTag
/// @ai:example ("{number} first - the first number") -> name "first", type "number", description "the first number"
/// @ai:example ("[second]") -> name "second", bracketed, description ""
/// @ai:effects pure
fn parse_param(body: &str) -> ParamTag {
    let mut rest = body.trim();
    let mut type_text = None;

    if let Some((inner, after)) = take_braced(rest) {
        type_text = Some(inner.to_string());
        rest = after.trim_start();
    }

    let (name, bracketed, after) = take_param_name(rest);
    rest = after.trim_start();

    if type_text.is_none() {
        if let Some((inner, after)) = take_braced(rest) {
            type_text = Some(inner.to_string());
            rest = after.trim_start();
        }
    }

    let description = rest.strip_prefix('-').unwrap_or(rest).trim().to_string();

    ParamTag {
        name,
        type_text,
        bracketed,
        description,
    }
}

fn take_param_name(text: &str) -> (String, bool, &str) {
    if let Some(stripped) = text.strip_prefix('[') {
        if let Some(end) = stripped.find(']') {
            let inner = &stripped[..end];
            let name = inner.split('=').next().unwrap_or(inner).trim();
            return (name.to_string(), true, &stripped[end + 1..]);
        }
    }

    let end = text.find(char::is_whitespace).unwrap_or(text.len());
    (text[..end].to_string(), false, &text[end..])
}

/// @ai:intent Take the text inside a leading balanced `{ }` pair
/// @ai:post None when the text does not start with `{` or the braces never close
/// @ai:effects pure
fn take_braced(text: &str) -> Option<(&str, &str)> {
    if !text.starts_with('{') {
        return None;
    }

    let mut depth = 0usize;
    for (idx, ch) in text.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((text[1..idx].trim(), &text[idx + 1..]));
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn block(text: &str) -> Vec<String> {
        vec![text.to_string()]
    }

    #[test]
    fn test_reads_full_block() {
        let tags = read_tags(&block(
            r#"/**
 * Test comments
 * @CustomFunction
 * @helpurl https://dev.office.com
 * @volatile
 * @streaming cancelable
 * @param {number} first - the first number
 * @param {number} [second] the second number
 * @return {Number} the sum
 */"#,
        ));

        assert_eq!(tags.description, "Test comments");
        assert_eq!(tags.help_url, "https://dev.office.com");
        assert!(tags.custom_function);
        assert!(tags.volatile);
        assert!(tags.streaming);
        assert!(tags.cancelable);
        assert_eq!(tags.return_type(), "Number");
        assert_eq!(tags.param_description("first"), Some("the first number"));
        assert_eq!(tags.param_type("first"), Some("number"));
        assert!(!tags.param_bracketed("first"));
        assert!(tags.param_bracketed("second"));
        assert_eq!(tags.param_description("second"), Some("the second number"));
    }

    #[test]
    fn test_defaults_when_tags_absent() {
        let tags = read_tags(&block("/** Just a description */"));

        assert_eq!(tags.description, "Just a description");
        assert_eq!(tags.help_url, "");
        assert!(!tags.custom_function);
        assert!(!tags.volatile);
        assert!(!tags.streaming);
        assert!(!tags.cancelable);
        assert_eq!(tags.return_type(), "any");
        assert_eq!(tags.param_type("missing"), None);
        assert_eq!(tags.param_description("missing"), None);
        assert!(!tags.param_bracketed("missing"));
    }

    #[test]
    fn test_no_blocks() {
        assert_eq!(read_tags(&[]), DocTags::default());
    }

    #[test]
    fn test_param_without_comment_or_type() {
        let tags = read_tags(&block("/**\n * @customfunction\n * @param value\n */"));

        assert_eq!(tags.param_description("value"), Some(""));
        assert_eq!(tags.param_type("value"), Some("any"));
    }

    #[test]
    fn test_streaming_without_cancelable() {
        let tags = read_tags(&block("/** @customfunction\n * @streaming\n */"));

        assert!(tags.custom_function);
        assert!(tags.streaming);
        assert!(!tags.cancelable);
    }

    #[test]
    fn test_parse_tags_in_order() {
        let parsed = parse_tags("/** @customfunction\n * @STREAMING Cancelable\n * @since 1.0 */");

        assert_eq!(
            parsed,
            vec![
                DocTag::CustomFunction,
                DocTag::Streaming { cancelable: true },
                DocTag::Unknown("since".to_string()),
            ]
        );
    }

    #[test]
    fn test_param_variants() {
        assert_eq!(
            parse_param("{Array<Array<number>>} [values=1] - the values"),
            ParamTag {
                name: "values".to_string(),
                type_text: Some("Array<Array<number>>".to_string()),
                bracketed: true,
                description: "the values".to_string(),
            }
        );
        assert_eq!(
            parse_param("name {string} description"),
            ParamTag {
                name: "name".to_string(),
                type_text: Some("string".to_string()),
                bracketed: false,
                description: "description".to_string(),
            }
        );
    }

    #[test]
    fn test_multiline_description_and_continuations() {
        let tags = read_tags(&block(
            "/**\n * First line\n * second line\n * @param {string} text starts here\n * and continues\n */",
        ));

        assert_eq!(tags.description, "First line\nsecond line");
        assert_eq!(
            tags.param_description("text"),
            Some("starts here\nand continues")
        );
    }

    #[test]
    fn test_description_from_first_block_only() {
        let tags = read_tags(&[
            "/** First block */".to_string(),
            "/** Second block\n * @customfunction */".to_string(),
        ]);

        assert_eq!(tags.description, "First block");
        assert!(tags.custom_function);
    }

    #[test]
    fn test_take_braced_nested() {
        assert_eq!(
            take_braced("{{a: number}} rest"),
            Some(("{a: number}", " rest"))
        );
        assert_eq!(take_braced("{unclosed"), None);
        assert_eq!(take_braced("no braces"), None);
    }
}
