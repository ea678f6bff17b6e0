//! Graph sources: where module graphs come from.
//!
//! A [`GraphSource`] materializes a complete [`Graph`] before any search
//! runs. [`ModuleRepository`] reads a JBoss-Modules style directory tree
//! where every module lives at `<name path>/<slot>/module.xml`:
//!
//! ```text
//! modules/
//! └── org/jboss/logging/
//!     └── main/
//!         └── module.xml      -> org.jboss.logging:main
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::types::{DEFAULT_SLOT, Dependency, ModuleId};

/// File name of a module descriptor.
pub const MODULE_DESCRIPTOR: &str = "module.xml";

/// Extension of the library archives listed by
/// [`ModuleRepository::jar_resources`].
pub const JAR_EXTENSION: &str = "jar";

/// Anything that can produce a module graph.
pub trait GraphSource {
    /// Load the complete graph.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying data can't be read or parsed.
    fn load(&self) -> Result<Graph>;
}

impl GraphSource for Graph {
    fn load(&self) -> Result<Graph> {
        Ok(self.clone())
    }
}

/// A directory tree of `module.xml` descriptors.
#[derive(Debug, Clone)]
pub struct ModuleRepository {
    root: PathBuf,
}

impl ModuleRepository {
    /// Open the repository rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if `root` does not exist or is not a directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.exists() {
            return Err(Error::Config(format!("{} does not exist", root.display())));
        }
        if !root.is_dir() {
            return Err(Error::Config(format!(
                "{} is not a directory",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    /// The repository root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every descriptor under the root, in sorted path order.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if a directory can't be listed.
    pub fn descriptors(&self) -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = fs::read_dir(&dir)?.collect::<std::io::Result<Vec<_>>>()?;
            entries.sort_by_key(fs::DirEntry::file_name);

            let mut subdirs = Vec::new();
            for entry in entries {
                let file_type = entry.file_type()?;
                if file_type.is_dir() {
                    subdirs.push(entry.path());
                } else if entry.file_name() == MODULE_DESCRIPTOR {
                    found.push(entry.path());
                }
            }
            // Reversed so the smallest name is popped first.
            pending.extend(subdirs.into_iter().rev());
        }

        found.sort();
        Ok(found)
    }

    /// Derive a module identifier from a descriptor's location.
    ///
    /// `<root>/a/b/<slot>/module.xml` names `a.b:<slot>`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Descriptor` if the path is outside the root, has no
    /// name components, or isn't valid UTF-8.
    pub fn module_id_for(&self, descriptor: &Path) -> Result<ModuleId> {
        let relative = descriptor
            .strip_prefix(&self.root)
            .map_err(|_| Error::descriptor(descriptor, "not inside the module repository"))?;

        let mut parts = relative
            .parent()
            .into_iter()
            .flat_map(Path::components)
            .map(|component| {
                component.as_os_str().to_str().ok_or_else(|| {
                    Error::descriptor(descriptor, "path is not valid UTF-8")
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let slot = parts.pop();
        match slot {
            Some(slot) if !parts.is_empty() => Ok(ModuleId::new(parts.join("."), slot)),
            _ => Err(Error::descriptor(
                descriptor,
                "expected <name>/<slot>/module.xml below the repository root",
            )),
        }
    }

    /// Library archives stored next to each module's descriptor.
    ///
    /// Every module maps to the `.jar` entries of its directory, sorted by
    /// file name; modules without archives map to an empty list. Resources
    /// that live elsewhere, such as artifacts resolved from a Maven
    /// repository, are not listed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if a module directory can't be listed, or
    /// `Error::Descriptor` if a descriptor's location names no module.
    pub fn jar_resources(&self) -> Result<BTreeMap<ModuleId, Vec<String>>> {
        let mut resources = BTreeMap::new();
        for descriptor in self.descriptors()? {
            let id = self.module_id_for(&descriptor)?;
            let dir = descriptor.parent().unwrap_or(&self.root);
            let jars = jars_in(dir)?;
            trace!(module = %id, jars = jars.len(), "Listed module resources");
            resources.insert(id, jars);
        }

        debug!(
            root = %self.root.display(),
            modules = resources.len(),
            jars = resources.values().map(Vec::len).sum::<usize>(),
            "Listed jar resources"
        );
        Ok(resources)
    }

    fn load_descriptor(&self, path: &Path, graph: &mut Graph) -> Result<()> {
        let id = self.module_id_for(path)?;
        let xml = fs::read_to_string(path)
            .map_err(|e| Error::descriptor(path, format!("cannot read: {e}")))?;
        let dependencies = parse_descriptor(&id, &xml).map_err(|e| Error::descriptor(path, e))?;

        trace!(module = %id, dependencies = dependencies.len(), "Loaded descriptor");
        graph.add_module(id.clone());
        for dependency in dependencies {
            graph.add_dependency(id.clone(), dependency);
        }
        Ok(())
    }
}

impl GraphSource for ModuleRepository {
    fn load(&self) -> Result<Graph> {
        let descriptors = self.descriptors()?;
        if descriptors.is_empty() {
            warn!(root = %self.root.display(), "No module descriptors found");
        }

        let mut graph = Graph::new();
        for path in &descriptors {
            self.load_descriptor(path, &mut graph)?;
        }

        debug!(
            root = %self.root.display(),
            modules = graph.module_count(),
            edges = graph.edge_count(),
            "Loaded module repository"
        );
        Ok(graph)
    }
}

/// File names ending in `.jar` directly inside `dir`, sorted.
///
/// Exploded archives (directories named `*.jar`) count too.
fn jars_in(dir: &Path) -> Result<Vec<String>> {
    let mut jars = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != JAR_EXTENSION) {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => jars.push(name),
            Err(name) => warn!(dir = %dir.display(), name = ?name, "Skipping non-UTF-8 file name"),
        }
    }
    jars.sort();
    Ok(jars)
}

// ============================================================================
// Descriptor parsing
// ============================================================================

/// Parse the dependencies declared by one descriptor.
///
/// Errors are plain messages; the caller attaches the file path.
fn parse_descriptor(id: &ModuleId, xml: &str) -> std::result::Result<Vec<Dependency>, String> {
    let mut reader = Reader::from_str(xml);
    let mut open: Vec<Vec<u8>> = Vec::new();
    let mut root: Option<Vec<u8>> = None;
    let mut dependencies = Vec::new();

    loop {
        let event = reader.read_event().map_err(|e| e.to_string())?;
        let (element, empty) = match &event {
            Event::Start(e) => (e, false),
            Event::Empty(e) => (e, true),
            Event::End(_) => {
                open.pop();
                continue;
            }
            Event::Eof => break,
            _ => continue,
        };

        let name = element.local_name().as_ref().to_vec();
        match (open.as_slice(), root.as_deref()) {
            ([], None) => {
                match name.as_slice() {
                    b"module" | b"module-absent" => {}
                    b"module-alias" => dependencies.push(alias_target(id, element)?),
                    other => {
                        return Err(format!(
                            "unexpected root element <{}>",
                            String::from_utf8_lossy(other)
                        ));
                    }
                }
                root = Some(name.clone());
            }
            ([module, section], Some(b"module"))
                if module.as_slice() == b"module"
                    && section.as_slice() == b"dependencies"
                    && name.as_slice() == b"module" =>
            {
                dependencies.push(module_dependency(id, element)?);
            }
            _ => {}
        }

        if !empty {
            open.push(name);
        }
    }

    if root.is_none() {
        return Err("no root element".to_string());
    }
    Ok(dependencies)
}

fn attribute(element: &BytesStart<'_>, key: &[u8]) -> std::result::Result<Option<String>, String> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        if attr.key.as_ref() == key {
            let value = attr.unescape_value().map_err(|e| e.to_string())?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn module_dependency(
    from: &ModuleId,
    element: &BytesStart<'_>,
) -> std::result::Result<Dependency, String> {
    let name = attribute(element, b"name")?
        .ok_or_else(|| "dependency <module> without a name attribute".to_string())?;
    let slot = attribute(element, b"slot")?.unwrap_or_else(|| DEFAULT_SLOT.to_string());
    let optional = match attribute(element, b"optional")?.as_deref() {
        None | Some("false") => false,
        Some("true") => true,
        Some(other) => return Err(format!("invalid optional flag '{other}' on {name}")),
    };
    Ok(Dependency::new(
        from.clone(),
        ModuleId::new(name, slot),
        optional,
    ))
}

fn alias_target(from: &ModuleId, element: &BytesStart<'_>) -> std::result::Result<Dependency, String> {
    let name = attribute(element, b"target-name")?
        .ok_or_else(|| "<module-alias> without a target-name attribute".to_string())?;
    let slot = attribute(element, b"target-slot")?.unwrap_or_else(|| DEFAULT_SLOT.to_string());
    Ok(Dependency::required(from.clone(), ModuleId::new(name, slot)))
}
