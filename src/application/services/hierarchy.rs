//! Component hierarchy service
//!
//! Builds the component tree by scanning a file, resolving its tags against its
//! imports and descending into every resolved file.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument, trace, warn};

use crate::application::{ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{
    ComponentNode, Expansion, ImportResolver, LineScanner, ScannedSource, TagExtractor,
};
use crate::infrastructure::traits::FileSystem;
use crate::util::path::{file_stem, join_clean};

/// Bounds on how far the builder descends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalLimits {
    /// Nodes at this depth are attached but not scanned (root is depth 0)
    pub max_depth: Option<usize>,
    /// Reuse subtrees of files that were already fully expanded
    pub memoize: bool,
}

struct CachedSubtree {
    expansion: Expansion,
    children: Vec<ComponentNode>,
    height: usize,
}

/// Per-build state: the files on the current recursion path and the subtree cache.
struct Walk<'a> {
    source_root: &'a Path,
    active: HashSet<PathBuf>,
    cache: HashMap<PathBuf, CachedSubtree>,
}

/// Service building component trees from an entry file.
pub struct HierarchyService {
    fs: Arc<dyn FileSystem>,
    scanner: LineScanner,
    extractor: TagExtractor,
    resolver: ImportResolver,
    limits: TraversalLimits,
}

impl HierarchyService {
    /// Create a service with the default scanning rules.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self::with_parts(
            fs,
            LineScanner::default(),
            TagExtractor::default(),
            ImportResolver::default(),
            TraversalLimits::default(),
        )
    }

    pub fn with_parts(
        fs: Arc<dyn FileSystem>,
        scanner: LineScanner,
        extractor: TagExtractor,
        resolver: ImportResolver,
        limits: TraversalLimits,
    ) -> Self {
        Self {
            fs,
            scanner,
            extractor,
            resolver,
            limits,
        }
    }

    /// Create a service with scanning rules taken from `settings`.
    pub fn from_settings(fs: Arc<dyn FileSystem>, settings: &Settings) -> ApplicationResult<Self> {
        let scanner = LineScanner::new(&settings.extensions)?;
        let extractor = TagExtractor::new(&settings.ignore_elements);
        let resolver = ImportResolver::new(settings.match_mode);
        let limits = TraversalLimits {
            max_depth: settings.max_depth,
            memoize: settings.memoize,
        };
        Ok(Self::with_parts(fs, scanner, extractor, resolver, limits))
    }

    /// Build the component tree rooted at `entry`.
    ///
    /// Import paths are joined onto `source_root`, whichever file they were
    /// found in. Files that cannot be opened become leaves; a read failure on
    /// an opened file aborts the build.
    #[instrument(level = "debug", skip(self))]
    pub fn build(&self, entry: &Path, source_root: &Path) -> ApplicationResult<ComponentNode> {
        let label = file_stem(&entry.to_string_lossy()).to_string();
        let mut root = ComponentNode::with_source(label, entry);
        let mut walk = Walk {
            source_root,
            active: HashSet::new(),
            cache: HashMap::new(),
        };

        self.expand(&mut root, entry, 0, &mut walk)?;

        if root.expansion == Expansion::Missing {
            warn!("cannot open entry file {}, tree has no children", entry.display());
        }
        debug!(nodes = root.node_count(), depth = root.depth(), "tree built");
        trace!(leaves = ?root.leaf_labels(), "leaf components");
        Ok(root)
    }

    fn expand(
        &self,
        node: &mut ComponentNode,
        path: &Path,
        depth: usize,
        walk: &mut Walk<'_>,
    ) -> ApplicationResult<()> {
        if self.limits.max_depth.is_some_and(|max| depth >= max) {
            node.expansion = Expansion::DepthLimit;
            return Ok(());
        }

        let key = self.file_key(path);
        if walk.active.contains(&key) {
            debug!(path = %path.display(), "already on the active path, not expanding");
            node.expansion = Expansion::Cycle;
            return Ok(());
        }

        if let Some(cached) = walk.cache.get(&key) {
            if self.limits.max_depth.map_or(true, |max| depth + cached.height <= max) {
                debug!(path = %path.display(), "reusing cached subtree");
                node.expansion = cached.expansion;
                node.children = cached.children.clone();
                return Ok(());
            }
        }

        let Some(scanned) = self.scan_file(path)? else {
            node.expansion = Expansion::Missing;
            return Ok(());
        };

        walk.active.insert(key.clone());
        let result = self.attach_children(node, &scanned, depth, walk);
        walk.active.remove(&key);
        result?;

        if self.limits.memoize && node.is_complete() {
            walk.cache.insert(
                key,
                CachedSubtree {
                    expansion: node.expansion,
                    children: node.children.clone(),
                    height: node.depth(),
                },
            );
        }
        Ok(())
    }

    fn attach_children(
        &self,
        node: &mut ComponentNode,
        scanned: &ScannedSource,
        depth: usize,
        walk: &mut Walk<'_>,
    ) -> ApplicationResult<()> {
        let tags = self.extractor.extract_all(&scanned.markup);

        for tag in &tags {
            for import_path in self.resolver.resolve(tag, &scanned.imports)? {
                let child_path = join_clean(walk.source_root, &import_path);
                debug!(tag = %tag, path = %child_path.display(), "resolved");

                let mut child = ComponentNode::with_source(tag.as_str(), &child_path);
                self.expand(&mut child, &child_path, depth + 1, walk)?;
                node.add_child(child);
            }
        }
        Ok(())
    }

    /// Scan `path`, or `None` when it cannot be opened.
    fn scan_file(&self, path: &Path) -> ApplicationResult<Option<ScannedSource>> {
        let reader = match self.fs.open_lines(path) {
            Ok(reader) => reader,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "cannot open, leaf");
                return Ok(None);
            }
        };

        let scanned = self
            .scanner
            .scan(reader)
            .with_path_context("read source file", path)?;
        debug!(
            path = %path.display(),
            imports = scanned.imports.len(),
            markup = scanned.markup.len(),
            "scanned"
        );
        Ok(Some(scanned))
    }

    /// Identity of a file on the recursion path.
    fn file_key(&self, path: &Path) -> PathBuf {
        self.fs
            .canonicalize(path)
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
