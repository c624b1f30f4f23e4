use crate::blueprint::{Blueprint, EntryKind};
use colored::Colorize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Represents a node in the tree (either file or directory).
#[derive(Debug)]
struct TreeNode {
    name: String,
    children: Vec<Rc<RefCell<TreeNode>>>,
    is_file: bool,
}
impl TreeNode {
    fn new(name: String, is_file: bool) -> Self {
        Self {
            name,
            children: Vec::new(),
            is_file,
        }
    }
}

/// Returns the node for `path`, creating it and any missing ancestor
/// directories on the way, the same implicit-parent semantics a generate run
/// has on disk.
fn intern_path(
    lookup: &mut HashMap<PathBuf, Rc<RefCell<TreeNode>>>,
    path: &Path,
    is_file: bool,
) -> Rc<RefCell<TreeNode>> {
    if let Some(node) = lookup.get(path) {
        return Rc::clone(node);
    }

    let name = path
        .file_name()
        .map(|os| os.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let node = Rc::new(RefCell::new(TreeNode::new(name, is_file)));

    // link under the parent node, conjuring it up first if the blueprint
    // never declared it explicitly
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            let parent_node = intern_path(lookup, parent, false);

            parent_node.borrow_mut().children.push(Rc::clone(&node));
        }
    }

    lookup.insert(path.to_path_buf(), Rc::clone(&node));

    node
}

/// Build the directory tree from the blueprint entries, returning the root node.
fn build_tree(blueprint: &Blueprint, destination: &Path) -> Rc<RefCell<TreeNode>> {
    // create a root node to represent the 'destination' directory
    let root_name = destination
        .file_name()
        .map(|os| os.to_string_lossy().to_string())
        .unwrap_or_else(|| destination.display().to_string());

    let root = Rc::new(RefCell::new(TreeNode::new(root_name, false)));

    // map full path to node, seeded with the destination itself so that
    // interning bottoms out at the root
    let mut lookup: HashMap<PathBuf, Rc<RefCell<TreeNode>>> = HashMap::new();
    lookup.insert(destination.to_path_buf(), Rc::clone(&root));

    for entry in &blueprint.entries {
        let full_path = destination.join(&entry.path);

        intern_path(&mut lookup, &full_path, entry.kind == EntryKind::File);
    }

    root
}

/// Print the tree with a nice ASCII style.
fn print_tree(node: &Rc<RefCell<TreeNode>>, prefix: &str, is_last: bool) {
    let node_borrow = node.borrow();

    let connector = if is_last {
        "└── ".yellow()
    } else {
        "├── ".yellow()
    };
    let name = if node_borrow.is_file {
        node_borrow.name.green()
    } else {
        node_borrow.name.blue()
    };
    println!("{}{}{}", prefix.yellow(), connector, name);

    let child_prefix = if is_last {
        format!("{}    ", prefix.yellow())
    } else {
        format!("{}│   ", prefix.yellow())
    };

    let len = node_borrow.children.len();
    for (i, child) in node_borrow.children.iter().enumerate() {
        let last = i == len - 1;
        print_tree(child, &child_prefix, last);
    }
}

/// Prints the tree a generate run would leave behind, without touching disk.
pub fn preview_as_tree(blueprint: &Blueprint, destination: &Path) {
    let tree_root = build_tree(blueprint, destination);

    println!(
        "Legend: {} = (directory), {} = (file)",
        "blue".blue(),
        "green".green()
    );

    let fancy_prompt = format!(
        "{} {}\n",
        "┌─".bold().bright_blue(),
        "Preview".bold().bright_blue(),
    );

    println!("{}", fancy_prompt);

    print_tree(&tree_root, "", true);

    let fancy_prompt = format!(
        "\n\n{} {}\n",
        "└─".bold().bright_blue(),
        "Nothing was written; run `generate` to materialize this tree".bright_green()
    );

    println!("{}", fancy_prompt);
}
