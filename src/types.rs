/*!
 * Core types and data structures for codetxt
 */

use std::cmp::Ordering;
use std::fmt;

/// Marker rendered for files whose bytes are not shown as text
pub const BINARY_MARKER: &str = "[binary]";

/// Marker rendered for files that could not be read or decoded
pub const UNREADABLE_MARKER: &str = "[unreadable]";

/// Kind of a filesystem node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Regular file
    File,
    /// Directory containing other entries
    Directory,
}

/// Content of a file after classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Decoded UTF-8 text; empty for zero-length files
    Text(String),
    /// Opaque bytes, not rendered
    Binary,
    /// Reading or decoding failed
    Unreadable,
}

impl FileContent {
    /// The reserved marker for non-text content, if any
    pub fn marker(&self) -> Option<&'static str> {
        match self {
            FileContent::Text(_) => None,
            FileContent::Binary => Some(BINARY_MARKER),
            FileContent::Unreadable => Some(UNREADABLE_MARKER),
        }
    }

    /// Text content, if this file was decoded
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FileContent::Text(text) => Some(text),
            _ => None,
        }
    }

}

impl fmt::Display for FileContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileContent::Text(text) => f.write_str(text),
            other => f.write_str(other.marker().unwrap_or_default()),
        }
    }
}

/// Represents a directory in the file system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    /// Directory name
    pub name: String,
    /// Relative path from scan root, `/` separated
    pub path: String,
    /// Sum of all descendant file sizes
    pub size: u64,
    /// Directory contents, directories first then by name
    pub children: Vec<Node>,
}

impl DirectoryNode {
    /// Build a directory from surviving children.
    ///
    /// Children are sorted and the size is summed here, so every directory
    /// in a tree satisfies the ordering and size invariants by construction.
    pub fn new(name: impl Into<String>, path: impl Into<String>, mut children: Vec<Node>) -> Self {
        children.sort_by(Node::display_order);
        let size = children.iter().map(Node::size).sum();
        Self {
            name: name.into(),
            path: path.into(),
            size,
            children,
        }
    }
}

/// Represents a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    /// File name
    pub name: String,
    /// Relative path from scan root, `/` separated
    pub path: String,
    /// Size on disk in bytes
    pub size: u64,
    /// Classified content
    pub content: FileContent,
}

/// A filesystem node that survived filtering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Directory node
    Directory(DirectoryNode),
    /// File node
    File(FileNode),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Directory(dir) => &dir.name,
            Node::File(file) => &file.name,
        }
    }

    /// Override the displayed name (used for the root)
    pub fn set_name(&mut self, name: impl Into<String>) {
        match self {
            Node::Directory(dir) => dir.name = name.into(),
            Node::File(file) => file.name = name.into(),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Node::Directory(dir) => &dir.path,
            Node::File(file) => &file.path,
        }
    }

    pub fn size(&self) -> u64 {
        match self {
            Node::Directory(dir) => dir.size,
            Node::File(file) => file.size,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Directory(_) => NodeKind::Directory,
            Node::File(_) => NodeKind::File,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind() == NodeKind::Directory
    }

    /// Children of a directory; empty for files
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Directory(dir) => &dir.children,
            Node::File(_) => &[],
        }
    }

    /// Sibling ordering: directories first, then ordinal comparison of names
    pub fn display_order(a: &Node, b: &Node) -> Ordering {
        match (a.is_dir(), b.is_dir()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => a.name().cmp(b.name()),
        }
    }

    /// Collect every file node in tree order
    pub fn files(&self) -> Vec<&FileNode> {
        let mut files = Vec::new();
        collect_files(self, &mut files);
        files
    }
}

fn collect_files<'a>(node: &'a Node, out: &mut Vec<&'a FileNode>) {
    match node {
        Node::File(file) => out.push(file),
        Node::Directory(dir) => {
            for child in &dir.children {
                collect_files(child, out);
            }
        }
    }
}
