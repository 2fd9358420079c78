//! Structure view of a configuration tree.

use crate::model::ConfigTree;

/// Draw the section/key structure, one `├── name` line per entry.
///
/// Keys are indented two spaces under their section.
pub fn to_tree(tree: &ConfigTree) -> String {
    let mut output = String::new();
    for (name, section) in tree.sections() {
        output.push_str(&format!("├── {}\n", name));
        for key in section.keys() {
            output.push_str(&format!("  ├── {}\n", key));
        }
    }
    output
}
