//! Tree formatter for buffered output
//!
//! This module provides `TreeFormatter` which formats a complete `TreeNode`
//! tree structure into a string or prints it with colors.

use std::borrow::Cow;
use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::tree::TreeNode;

use super::config::OutputConfig;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE_INDENT: &str = "│   ";
const SPACE_INDENT: &str = "    ";

/// Formatter for buffered tree output.
pub struct TreeFormatter {
    config: OutputConfig,
}

impl TreeFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Text shown for a node: its full path or its base name.
    fn display<'a>(&self, node: &'a TreeNode) -> Cow<'a, str> {
        if self.config.full_path {
            node.path().to_string_lossy()
        } else {
            Cow::Borrowed(node.name())
        }
    }

    /// One line per entry below `node`; the node itself is not listed.
    pub fn format(&self, node: &TreeNode) -> String {
        let mut output = String::new();
        self.format_children(node, &mut output, "");
        output
    }

    fn format_children(&self, node: &TreeNode, output: &mut String, prefix: &str) {
        let children = node.children();
        for (i, child) in children.iter().enumerate() {
            let is_last = i == children.len() - 1;
            let connector = if is_last { LAST_BRANCH } else { BRANCH };

            output.push_str(prefix);
            output.push_str(connector);
            output.push_str(&self.display(child));
            output.push('\n');

            if child.is_dir() {
                let new_prefix = child_prefix(prefix, is_last);
                self.format_children(child, output, &new_prefix);
            }
        }
    }

    pub fn print(&self, node: &TreeNode) -> io::Result<()> {
        let choice = if self.config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.print_children(node, &mut stdout, "")?;
        stdout.flush()
    }

    fn print_children(
        &self,
        node: &TreeNode,
        stdout: &mut StandardStream,
        prefix: &str,
    ) -> io::Result<()> {
        let children = node.children();
        for (i, child) in children.iter().enumerate() {
            let is_last = i == children.len() - 1;
            let connector = if is_last { LAST_BRANCH } else { BRANCH };

            write!(stdout, "{}{}", prefix, connector)?;
            self.write_name(stdout, child)?;

            if child.is_dir() {
                let new_prefix = child_prefix(prefix, is_last);
                self.print_children(child, stdout, &new_prefix)?;
            }
        }
        Ok(())
    }

    /// Write a node's display text and end the line.
    fn write_name(&self, stdout: &mut StandardStream, node: &TreeNode) -> io::Result<()> {
        if node.is_dir() {
            stdout.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
        }
        write!(stdout, "{}", self.display(node))?;
        stdout.reset()?;
        writeln!(stdout)
    }
}

/// Prefix for the children of an entry drawn with `prefix`.
fn child_prefix(prefix: &str, is_last: bool) -> String {
    if is_last {
        format!("{}{}", prefix, SPACE_INDENT)
    } else {
        format!("{}{}", prefix, PIPE_INDENT)
    }
}
