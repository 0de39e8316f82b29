//! Tests for HierarchyService against real source trees

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use reacttree::application::services::{HierarchyService, TraversalLimits};
use reacttree::domain::{
    ComponentNode, Expansion, ImportResolver, LineScanner, MatchMode, TagExtractor,
};
use reacttree::infrastructure::traits::RealFileSystem;
use reacttree::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

/// Helper to create source files for testing
fn create_source(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create source dir");
    }
    std::fs::write(&path, content).expect("write source file");
    path
}

fn service() -> HierarchyService {
    HierarchyService::new(Arc::new(RealFileSystem))
}

fn labels(node: &ComponentNode) -> Vec<(usize, &str)> {
    node.iter().map(|(d, n)| (d, n.label.as_str())).collect()
}

fn build(temp: &TempDir, entry: &Path) -> ComponentNode {
    service().build(entry, temp.path()).expect("build tree")
}

#[test]
fn given_entry_rendering_imported_component_when_building_then_root_has_that_child() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let entry = create_source(
        &temp,
        "index.js",
        r#"import Header from './Header.jsx';
ReactDOM.render(<Header />, root);
"#,
    );
    create_source(&temp, "Header.jsx", "export default () => null;\n");

    // Act
    let root = build(&temp, &entry);

    // Assert
    assert_eq!(root.label, "index");
    assert_eq!(labels(&root), vec![(0, "index"), (1, "Header")]);
    assert_eq!(root.children[0].source, Some(temp.path().join("Header.jsx")));
    assert_eq!(root.children[0].expansion, Expansion::Expanded);
}

#[test]
fn given_nested_components_when_building_then_tree_follows_render_order() {
    let temp = TempDir::new().unwrap();
    let entry = create_source(
        &temp,
        "index.js",
        r#"import App from './App.jsx';
render(<App />);
"#,
    );
    create_source(
        &temp,
        "App.jsx",
        r#"import Footer from './components/Footer.jsx';
import Header from './components/Header.jsx';
export default function App() {
  return (
    <div>
      <Header />
      <main>content</main>
      <Footer />
    </div>
  );
}
"#,
    );
    create_source(
        &temp,
        "components/Header.jsx",
        r#"import Logo from './components/Logo.tsx';
export default () => <Logo />;
"#,
    );
    create_source(&temp, "components/Logo.tsx", "export default () => <img />;\n");
    create_source(&temp, "components/Footer.jsx", "export default () => <footer />;\n");

    let root = build(&temp, &entry);

    assert_eq!(
        labels(&root),
        vec![
            (0, "index"),
            (1, "App"),
            (2, "Header"),
            (3, "Logo"),
            (2, "Footer"),
        ]
    );
}

#[test]
fn given_same_input_when_building_twice_then_trees_are_identical() {
    let temp = TempDir::new().unwrap();
    let entry = create_source(
        &temp,
        "index.js",
        "import A from './A.js';\nimport B from './B.js';\n<A />\n<B />\n",
    );
    create_source(&temp, "A.js", "import B from './B.js';\n<B />\n");
    create_source(&temp, "B.js", "<span />\n");

    assert_eq!(build(&temp, &entry), build(&temp, &entry));
}

#[test]
fn given_only_builtin_elements_when_building_then_root_is_leaf() {
    let temp = TempDir::new().unwrap();
    let entry = create_source(
        &temp,
        "index.js",
        r#"import './styles.js';
<div><section><p>text</p></section></div>
"#,
    );

    let root = build(&temp, &entry);

    assert!(root.is_leaf());
    assert_eq!(root.expansion, Expansion::Expanded);
}

#[test]
fn given_tag_without_matching_import_when_building_then_no_child() {
    let temp = TempDir::new().unwrap();
    let entry = create_source(
        &temp,
        "index.js",
        "import Header from './Header.js';\n<Sidebar />\n",
    );

    let root = build(&temp, &entry);

    assert!(root.is_leaf());
}

#[test]
fn given_tag_contained_in_other_import_when_building_then_both_are_children() {
    // "Nav" is a substring of the NavBar import line as well
    let temp = TempDir::new().unwrap();
    let entry = create_source(
        &temp,
        "index.js",
        r#"import Nav from './Nav.js';
import NavBar from './NavBar.js';
<Nav />
"#,
    );

    let root = build(&temp, &entry);

    let sources: Vec<_> = root.children.iter().map(|c| c.source.clone()).collect();
    assert_eq!(
        sources,
        vec![
            Some(temp.path().join("Nav.js")),
            Some(temp.path().join("NavBar.js")),
        ]
    );
    assert!(root.children.iter().all(|c| c.label == "Nav"));
}

#[test]
fn given_word_boundary_mode_when_building_then_collision_is_ignored() {
    let temp = TempDir::new().unwrap();
    let entry = create_source(
        &temp,
        "index.js",
        r#"import Nav from './Nav.js';
import NavBar from './NavBar.js';
<Nav />
"#,
    );
    let service = HierarchyService::with_parts(
        Arc::new(RealFileSystem),
        LineScanner::default(),
        TagExtractor::default(),
        ImportResolver::new(MatchMode::Word),
        TraversalLimits::default(),
    );

    let root = service.build(&entry, temp.path()).unwrap();

    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].source, Some(temp.path().join("Nav.js")));
}

#[test]
fn given_import_of_missing_file_when_building_then_child_is_silent_leaf() {
    let temp = TempDir::new().unwrap();
    let entry = create_source(
        &temp,
        "index.js",
        "import Ghost from './Ghost.jsx';\n<Ghost />\n",
    );

    let root = build(&temp, &entry);

    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].label, "Ghost");
    assert_eq!(root.children[0].expansion, Expansion::Missing);
    assert!(root.children[0].is_leaf());
}

#[test]
fn given_missing_entry_when_building_then_returns_lone_root() {
    let temp = TempDir::new().unwrap();

    let root = build(&temp, &temp.path().join("index.js"));

    assert_eq!(root.label, "index");
    assert!(root.is_leaf());
    assert_eq!(root.expansion, Expansion::Missing);
}

#[test]
fn given_components_importing_each_other_when_building_then_terminates() {
    let temp = TempDir::new().unwrap();
    let entry = create_source(&temp, "index.js", "import A from './A.js';\n<A />\n");
    create_source(&temp, "A.js", "import B from './B.js';\n<B />\n");
    create_source(&temp, "B.js", "import A from './A.js';\n<A />\n");

    let root = build(&temp, &entry);

    assert_eq!(
        labels(&root),
        vec![
            (0, "index"),
            (1, "A"),
            (2, "B"),
            (3, "A"),
        ]
    );
    assert_eq!(root.children[0].children[0].children[0].expansion, Expansion::Cycle);
}

#[test]
fn given_latin1_bytes_in_component_when_building_then_scans_it_anyway() {
    let temp = TempDir::new().unwrap();
    let entry = create_source(&temp, "index.js", "import Header from './Header.jsx';\n<Header />\n");
    let mut header = b"// \xa9 2020 Acme\r\n".to_vec();
    header.extend_from_slice(b"import Logo from './Logo.jsx';\r\nexport default () => <Logo />;\r\n");
    std::fs::write(temp.path().join("Header.jsx"), header).unwrap();

    let root = build(&temp, &entry);

    assert_eq!(labels(&root), vec![(0, "index"), (1, "Header"), (2, "Logo")]);
    assert_eq!(root.children[0].expansion, Expansion::Expanded);
}

#[test]
fn given_import_of_directory_when_building_then_child_is_silent_leaf() {
    let temp = TempDir::new().unwrap();
    let entry = create_source(
        &temp,
        "index.js",
        "const Panel = require(\"./widgets\"); // widgets/index.js\n<Panel />\n",
    );
    std::fs::create_dir_all(temp.path().join("widgets")).unwrap();

    let root = build(&temp, &entry);

    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].expansion, Expansion::Missing);
}
