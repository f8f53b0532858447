//! Lookup of compiled contracts in a Hardhat artifacts directory.
//!
//! Hardhat writes one JSON file per contract to
//! `<artifacts>/<source path>/<Contract>.json` next to a `<Contract>.dbg.json`
//! debug file, plus the raw compiler output under `build-info/`.

use {
    alloy::{json_abi::JsonAbi, primitives::Bytes},
    anyhow::{Context, Result},
    serde::Deserialize,
    std::{
        collections::BTreeMap,
        path::{Path, PathBuf},
    },
    walkdir::WalkDir,
};

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("artifact for contract {name} not found in {}", dir.display())]
    NotFound { name: String, dir: PathBuf },
    #[error(
        "there are multiple artifacts for contract {name}, use one of the fully qualified names: \
         {}",
        candidates.join(", ")
    )]
    Ambiguous {
        name: String,
        candidates: Vec<String>,
    },
    #[error("contract {0} is abstract or an interface and can't be deployed")]
    Abstract(String),
    #[error("contract {name} needs to be linked against the libraries {}", libraries.join(", "))]
    MissingLinks {
        name: String,
        libraries: Vec<String>,
    },
}

/// A compiled contract as written by Hardhat (`hh-sol-artifact-1`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    pub source_name: String,
    pub abi: JsonAbi,
    /// Hex encoded creation code. Kept as a string because unlinked code
    /// contains `__$<hash>$__` placeholders that are not valid hex.
    pub bytecode: String,
    /// Source file -> library name -> positions of the placeholders.
    #[serde(default)]
    pub link_references: BTreeMap<String, BTreeMap<String, serde_json::Value>>,
}

impl Artifact {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read artifact {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("failed to parse artifact {}", path.display()))
    }

    /// `<source>:<Contract>`, the name that identifies a contract uniquely
    /// within a project.
    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }

    /// Code that, when sent in a create transaction, deploys the contract.
    pub fn creation_code(&self) -> Result<Bytes> {
        if !self.link_references.is_empty() {
            let libraries = self
                .link_references
                .iter()
                .flat_map(|(source, libraries)| {
                    libraries.keys().map(move |library| format!("{source}:{library}"))
                })
                .collect();
            return Err(ArtifactError::MissingLinks {
                name: self.contract_name.clone(),
                libraries,
            }
            .into());
        }

        let code: Bytes = self
            .bytecode
            .parse()
            .with_context(|| format!("invalid bytecode for contract {}", self.contract_name))?;
        if code.is_empty() {
            return Err(ArtifactError::Abstract(self.contract_name.clone()).into());
        }
        Ok(code)
    }
}

/// An artifacts directory.
#[derive(Debug, Clone)]
pub struct Artifacts {
    root: PathBuf,
}

impl Artifacts {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Finds the artifact of a contract either by its bare name
    /// (`NFTMarketplace`) or by its fully qualified name
    /// (`contracts/NFTMarketplace.sol:NFTMarketplace`).
    pub fn find(&self, name: &str) -> Result<Artifact> {
        anyhow::ensure!(
            self.root.is_dir(),
            "artifacts directory {} does not exist, are the contracts compiled?",
            self.root.display()
        );

        let path = match name.rsplit_once(':') {
            Some((source, contract)) => {
                let path = self.root.join(source).join(format!("{contract}.json"));
                if !path.is_file() {
                    return Err(self.not_found(name).into());
                }
                path
            }
            None => self.search(name)?,
        };
        tracing::debug!(path = %path.display(), "loading artifact");
        Artifact::load(&path)
    }

    fn search(&self, name: &str) -> Result<PathBuf, ArtifactError> {
        let file_name = format!("{name}.json");
        let mut matches: Vec<PathBuf> = WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != "build-info")
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file() && entry.file_name() == file_name.as_str())
            .map(walkdir::DirEntry::into_path)
            .collect();

        match matches.len() {
            0 => Err(self.not_found(name)),
            1 => Ok(matches.remove(0)),
            _ => {
                let mut candidates: Vec<String> = matches
                    .iter()
                    .map(|path| self.fully_qualified_name(path, name))
                    .collect();
                candidates.sort();
                Err(ArtifactError::Ambiguous {
                    name: name.to_string(),
                    candidates,
                })
            }
        }
    }

    fn fully_qualified_name(&self, path: &Path, name: &str) -> String {
        let source = path
            .parent()
            .and_then(|dir| dir.strip_prefix(&self.root).ok())
            .unwrap_or(Path::new(""));
        format!("{}:{name}", source.display())
    }

    fn not_found(&self, name: &str) -> ArtifactError {
        ArtifactError::NotFound {
            name: name.to_string(),
            dir: self.root.clone(),
        }
    }
}
