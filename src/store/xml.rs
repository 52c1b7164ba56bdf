//! XML tree files
//!
//! Each node becomes a `directory` or `file` element carrying `name` and
//! `path` attributes, with children nested in stored order:
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <directory name="project" path="/home/me/project">
//!   <file name="README.md" path="/home/me/project/README.md"/>
//!   <directory name="src" path="/home/me/project/src"/>
//! </directory>
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

use crate::error::{Error, Result};
use crate::tree::TreeNode;

use super::DataHandler;

const DIRECTORY_TAG: &str = "directory";
const FILE_TAG: &str = "file";
const INDENT_WIDTH: usize = 2;

/// A generic XML element: tag, attributes in document order, child elements.
///
/// Text content is not represented.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Value of the first attribute named `key`.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Write a full document (declaration plus this element as root).
    pub fn write_document<W: Write>(&self, inner: W) -> Result<W> {
        let mut writer = Writer::new_with_indent(inner, b' ', INDENT_WIDTH);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        self.write_element(&mut writer)?;
        writer.get_mut().write_all(b"\n")?;
        Ok(writer.into_inner())
    }

    fn write_element<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new(self.tag.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        for child in &self.children {
            child.write_element(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.tag.as_str())))?;
        Ok(())
    }

    /// Render the full document as a string.
    pub fn to_document_string(&self) -> Result<String> {
        let bytes = self.write_document(Vec::new())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Parse a document and return its root element.
    pub fn parse(document: &str) -> Result<Self> {
        let mut reader = Reader::from_str(document);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => stack.push(element_from_start(&e)?),
                Event::Empty(e) => {
                    let element = element_from_start(&e)?;
                    attach(element, &mut stack, &mut root)?;
                }
                Event::End(e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    let element = stack
                        .pop()
                        .ok_or_else(|| Error::Unbalanced(format!("unexpected </{}>", name)))?;
                    if element.tag != name {
                        return Err(Error::Unbalanced(format!(
                            "<{}> closed by </{}>",
                            element.tag, name
                        )));
                    }
                    attach(element, &mut stack, &mut root)?;
                }
                Event::Eof => break,
                // Whitespace is already trimmed, so anything left is content
                Event::Text(_) | Event::CData(_) | Event::GeneralRef(_) if stack.is_empty() => {
                    return Err(Error::Unbalanced(
                        "text outside the root element".to_string(),
                    ));
                }
                // Declarations, comments and element text carry no tree data
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(Error::Unbalanced(format!("<{}> is never closed", open.tag)));
        }
        root.ok_or(Error::MissingRoot)
    }
}

fn element_from_start(start: &BytesStart) -> Result<XmlElement> {
    let mut element = XmlElement::new(String::from_utf8_lossy(start.name().as_ref()));
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value);
        let value = quick_xml::escape::unescape(&raw)?;
        element.attributes.push((key, value.into_owned()));
    }
    Ok(element)
}

/// Attach a finished element to its parent, or make it the document root.
fn attach(
    element: XmlElement,
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => {
            return Err(Error::Unbalanced(format!(
                "second root element <{}>",
                element.tag
            )));
        }
        None => *root = Some(element),
    }
    Ok(())
}

/// Convert a tree node into its XML element.
pub fn encode(node: &TreeNode) -> XmlElement {
    let tag = if node.is_dir() { DIRECTORY_TAG } else { FILE_TAG };
    let mut element = XmlElement::new(tag)
        .with_attribute("name", node.name())
        .with_attribute("path", node.path().to_string_lossy());
    element.children = node.children().iter().map(encode).collect();
    element
}

/// Convert an XML element back into a tree node.
///
/// Missing `name` or `path` attributes decode as empty strings.
pub fn decode(element: &XmlElement) -> Result<TreeNode> {
    let name = element.attribute("name").unwrap_or_default();
    let path = PathBuf::from(element.attribute("path").unwrap_or_default());

    match element.tag.as_str() {
        DIRECTORY_TAG => {
            let children = element
                .children
                .iter()
                .map(decode)
                .collect::<Result<Vec<_>>>()?;
            Ok(TreeNode::dir(name, path, children))
        }
        FILE_TAG if !element.children.is_empty() => {
            Err(Error::FileWithChildren(name.to_string()))
        }
        FILE_TAG => Ok(TreeNode::file(name, path)),
        other => Err(Error::UnexpectedElement(other.to_string())),
    }
}

/// Stores trees as UTF-8 XML documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlHandler;

impl DataHandler for XmlHandler {
    fn save(&self, node: &TreeNode, path: &Path) -> Result<()> {
        let io_error = |source| Error::Io {
            path: path.to_path_buf(),
            source,
        };
        let document = encode(node).write_document(Vec::new())?;
        let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);
        writer.write_all(&document).map_err(io_error)?;
        writer.flush().map_err(io_error)?;
        info!("saved tree to {}", path.display());
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<TreeNode> {
        let document = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        decode(&XmlElement::parse(&document)?)
    }

    fn extension(&self) -> &'static str {
        "xml"
    }
}

impl From<&TreeNode> for XmlElement {
    fn from(node: &TreeNode) -> Self {
        encode(node)
    }
}

impl TryFrom<&XmlElement> for TreeNode {
    type Error = Error;

    fn try_from(element: &XmlElement) -> Result<Self> {
        decode(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestDir;

    fn sample() -> TreeNode {
        TreeNode::dir(
            "test_dir",
            "/path/to/test_dir",
            vec![
                TreeNode::file("file1.txt", "/path/to/test_dir/file1.txt"),
                TreeNode::dir(
                    "sub_dir",
                    "/path/to/test_dir/sub_dir",
                    vec![TreeNode::file("deep.rs", "/path/to/test_dir/sub_dir/deep.rs")],
                ),
                TreeNode::dir("empty", "/path/to/test_dir/empty", vec![]),
            ],
        )
    }

    #[test]
    fn test_encode_structure() {
        let element = encode(&sample());
        assert_eq!(element.tag, "directory");
        assert_eq!(
            element.attributes,
            vec![
                ("name".to_string(), "test_dir".to_string()),
                ("path".to_string(), "/path/to/test_dir".to_string()),
            ]
        );
        let tags: Vec<_> = element.children.iter().map(|c| c.tag.as_str()).collect();
        assert_eq!(tags, vec!["file", "directory", "directory"]);
        assert_eq!(element.children[1].children[0].attribute("name"), Some("deep.rs"));
    }

    #[test]
    fn test_decode_inverts_encode() {
        let tree = sample();
        assert_eq!(decode(&encode(&tree)).unwrap(), tree);

        let leaf = TreeNode::file("only.txt", "/only.txt");
        assert_eq!(decode(&encode(&leaf)).unwrap(), leaf);
    }

    #[test]
    fn test_document_has_declaration() {
        let document = encode(&sample()).to_document_string().unwrap();
        assert!(document.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(document.contains("<directory name=\"test_dir\" path=\"/path/to/test_dir\">"));
        assert!(document.contains("  <file name=\"file1.txt\""));
        assert!(document.contains("<directory name=\"empty\" path=\"/path/to/test_dir/empty\"/>"));
        assert!(document.trim_end().ends_with("</directory>"));
    }

    #[test]
    fn test_parse_document_order() {
        let document = r#"<?xml version="1.0" encoding="utf-8"?>
            <!-- generated -->
            <directory name="r" path="/r">
                <file name="b" path="/r/b"/>
                <directory name="a" path="/r/a"></directory>
                <file name="c" path="/r/c"/>
            </directory>"#;
        let element = XmlElement::parse(document).unwrap();
        let names: Vec<_> = element
            .children
            .iter()
            .map(|c| c.attribute("name").unwrap())
            .collect();
        assert_eq!(names, vec!["b", "a", "c"]);

        let tree = decode(&element).unwrap();
        assert_eq!(tree.children()[1], TreeNode::dir("a", "/r/a", vec![]));
    }

    #[test]
    fn test_special_characters_survive() {
        let tree = TreeNode::dir(
            "a & b",
            "/tmp/a & b",
            vec![TreeNode::file("<\"quoted\">'s", "/tmp/a & b/<\"quoted\">'s")],
        );
        let document = encode(&tree).to_document_string().unwrap();
        assert!(document.contains("a &amp; b"));

        let parsed = XmlElement::parse(&document).unwrap();
        assert_eq!(decode(&parsed).unwrap(), tree);
    }

    #[test]
    fn test_non_ascii_names_survive() {
        let tree = TreeNode::dir(
            "каталог",
            "/tmp/каталог",
            vec![TreeNode::file("файл.txt", "/tmp/каталог/файл.txt")],
        );
        let document = encode(&tree).to_document_string().unwrap();
        let parsed = XmlElement::parse(&document).unwrap();
        assert_eq!(decode(&parsed).unwrap(), tree);
    }

    #[test]
    fn test_missing_attributes_decode_empty() {
        let element = XmlElement::parse("<file/>").unwrap();
        assert_eq!(decode(&element).unwrap(), TreeNode::file("", ""));
    }

    #[test]
    fn test_decode_rejects_unknown_tag() {
        let element = XmlElement::parse("<directory><link name=\"x\"/></directory>").unwrap();
        assert!(matches!(decode(&element), Err(Error::UnexpectedElement(tag)) if tag == "link"));
    }

    #[test]
    fn test_decode_rejects_file_with_children() {
        let mut element = XmlElement::new("file")
            .with_attribute("name", "f")
            .with_attribute("path", "/f");
        element.children.push(XmlElement::new("file"));
        assert!(matches!(decode(&element), Err(Error::FileWithChildren(_))));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(XmlElement::parse(""), Err(Error::MissingRoot)));
        assert!(matches!(
            XmlElement::parse("<?xml version=\"1.0\"?>"),
            Err(Error::MissingRoot)
        ));
        assert!(XmlElement::parse("<directory name=\"x\">").is_err());
        assert!(XmlElement::parse("<directory></file>").is_err());
        assert!(XmlElement::parse("<file/><file/>").is_err());
    }

    #[test]
    fn test_parse_rejects_text_outside_root() {
        let trailing = XmlElement::parse("<file name=\"a\" path=\"/a\"/>trailing garbage");
        assert!(matches!(trailing, Err(Error::Unbalanced(_))), "{:?}", trailing);

        let leading = XmlElement::parse("garbage<file name=\"a\" path=\"/a\"/>");
        assert!(matches!(leading, Err(Error::Unbalanced(_))), "{:?}", leading);

        let entity = XmlElement::parse("<file/>&amp;");
        assert!(entity.is_err(), "{:?}", entity);

        // Surrounding whitespace and text inside elements are fine
        let element = XmlElement::parse("\n  <directory>ignored<file/></directory>\n\n").unwrap();
        assert_eq!(element.children.len(), 1);
    }

    #[test]
    fn test_conversion_traits_match_codec() {
        let tree = sample();
        let element = XmlElement::from(&tree);
        assert_eq!(element, encode(&tree));
        assert_eq!(TreeNode::try_from(&element).unwrap(), tree);

        let unknown = XmlElement::new("symlink");
        assert!(matches!(
            TreeNode::try_from(&unknown),
            Err(Error::UnexpectedElement(_))
        ));
    }

    /// Directory `depth` levels deep with `width` files and `width` subdirectories
    /// per level; names mix in characters that need escaping.
    fn generated_tree(path: &str, depth: usize, width: usize) -> TreeNode {
        let mut children = Vec::new();
        for i in 0..width {
            let name = format!("f{}&<\"{}\">.txt", i, depth);
            children.push(TreeNode::file(name.clone(), format!("{}/{}", path, name)));
        }
        if depth > 0 {
            for i in 0..width {
                let name = format!("d{} é'{}", i, depth);
                let child_path = format!("{}/{}", path, name);
                children.push(generated_tree(&child_path, depth - 1, width));
            }
        }
        let name = path.rsplit('/').next().unwrap_or_default().to_string();
        TreeNode::dir(name, path, children)
    }

    #[test]
    fn test_generated_trees_round_trip() {
        for depth in 0..4 {
            for width in 0..4 {
                let tree = generated_tree("/gen/root", depth, width);
                let (dirs, files) = tree.count();
                assert_eq!(dirs + files, encoded_len(&encode(&tree)) - 1);

                assert_eq!(decode(&encode(&tree)).unwrap(), tree, "depth {depth} width {width}");

                let document = encode(&tree).to_document_string().unwrap();
                let parsed = XmlElement::parse(&document).unwrap();
                assert_eq!(decode(&parsed).unwrap(), tree, "depth {depth} width {width}");
            }
        }
    }

    fn encoded_len(element: &XmlElement) -> usize {
        1 + element.children.iter().map(encoded_len).sum::<usize>()
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TestDir::new();
        let file = tmp.path().join("directory_structure.xml");

        XmlHandler.save(&sample(), &file).unwrap();
        assert!(file.exists());

        let contents = std::fs::read_to_string(&file).unwrap();
        assert!(contents.starts_with("<?xml"));
        assert_eq!(XmlHandler.load(&file).unwrap(), sample());
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = TestDir::new();
        let result = XmlHandler.load(&tmp.path().join("missing.xml"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_load_malformed_file() {
        let tmp = TestDir::new();
        let file = tmp.add_file("bad.xml", "<directory name=\"x\"><file></directory>");
        assert!(XmlHandler.load(&file).is_err());
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let tmp = TestDir::new();
        let file = tmp.path().join("no/such/dir/tree.xml");
        assert!(matches!(
            XmlHandler.save(&sample(), &file),
            Err(Error::Io { .. })
        ));
    }
}
