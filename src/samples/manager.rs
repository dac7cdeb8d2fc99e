//! Sample loading and live reload.
//!
//! Loading priority: built-in < user-global < workspace. A sample from a
//! higher-priority source replaces one with the same name. Sample directories
//! are watched and the whole set is reloaded on any change.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::{mpsc, RwLock};
use tower_lsp::lsp_types::MessageType;
use tower_lsp::Client;

use crate::config::Config;
use crate::samples::registry::SampleRegistry;
use crate::samples::schema::{Sample, SampleFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SamplePriority {
    BuiltIn = 0,
    UserGlobal = 1,
    Workspace = 2,
}

/// A sample with where it came from
#[derive(Debug, Clone)]
pub struct LoadedSample {
    pub sample: Sample,
    pub priority: SamplePriority,
    pub source_path: Option<PathBuf>,
}

#[derive(Debug)]
enum WatcherEvent {
    SampleFileChanged(PathBuf),
    WatcherError(notify::Error),
}

type SampleMap = HashMap<String, LoadedSample>;

pub struct SampleManager {
    samples: Arc<RwLock<SampleMap>>,
    /// Directories in ascending priority
    sample_dirs: Vec<(PathBuf, SamplePriority)>,
    _watcher: Option<RecommendedWatcher>,
    client: Option<Client>,
}

impl SampleManager {
    pub fn new(config: &Config) -> Self {
        Self::with_dirs(
            config.user_sample_dir.clone(),
            config.workspace_sample_dirs.clone(),
        )
    }

    pub fn with_dirs(user_dir: Option<PathBuf>, workspace_dirs: Vec<PathBuf>) -> Self {
        let sample_dirs = user_dir
            .into_iter()
            .map(|dir| (dir, SamplePriority::UserGlobal))
            .chain(
                workspace_dirs
                    .into_iter()
                    .map(|dir| (dir, SamplePriority::Workspace)),
            )
            .collect();

        Self {
            samples: Arc::new(RwLock::new(HashMap::new())),
            sample_dirs,
            _watcher: None,
            client: None,
        }
    }

    /// Load samples, then start watching the sample directories
    pub async fn initialize(&mut self, client: Option<Client>) -> Result<()> {
        self.client = client;
        self.load().await;
        self.start_watching()?;
        Ok(())
    }

    /// Load every source into the shared map, replacing its contents
    pub async fn load(&self) {
        let samples = load_all(&self.sample_dirs, self.client.as_ref()).await;
        let count = samples.len();
        *self.samples.write().await = samples;

        report(
            self.client.as_ref(),
            MessageType::INFO,
            format!("Loaded {} XSLT samples", count),
        )
        .await;
    }

    fn start_watching(&mut self) -> Result<()> {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) => {
                    if let EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) =
                        event.kind
                    {
                        for path in event.paths.into_iter().filter(|p| is_sample_file(p)) {
                            let _ = tx.send(WatcherEvent::SampleFileChanged(path));
                        }
                    }
                }
                Err(e) => {
                    let _ = tx.send(WatcherEvent::WatcherError(e));
                }
            },
            notify::Config::default().with_poll_interval(Duration::from_secs(1)),
        )?;

        for (dir, _) in &self.sample_dirs {
            if dir.exists() {
                watcher
                    .watch(dir, RecursiveMode::NonRecursive)
                    .with_context(|| format!("Failed to watch sample directory: {}", dir.display()))?;
            }
        }
        self._watcher = Some(watcher);

        self.spawn_reload_task(rx);
        Ok(())
    }

    fn spawn_reload_task(&self, mut rx: mpsc::UnboundedReceiver<WatcherEvent>) {
        let samples = self.samples.clone();
        let sample_dirs = self.sample_dirs.clone();
        let client = self.client.clone();

        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                match event {
                    WatcherEvent::SampleFileChanged(path) => {
                        report(
                            client.as_ref(),
                            MessageType::INFO,
                            format!("Sample file changed: {}", path.display()),
                        )
                        .await;

                        let reloaded = load_all(&sample_dirs, client.as_ref()).await;
                        *samples.write().await = reloaded;

                        report(
                            client.as_ref(),
                            MessageType::INFO,
                            "Samples reloaded due to file changes",
                        )
                        .await;
                    }
                    WatcherEvent::WatcherError(e) => {
                        report(
                            client.as_ref(),
                            MessageType::ERROR,
                            format!("Sample file watcher error: {}", e),
                        )
                        .await;
                    }
                }
            }
        });
    }

    pub async fn get_sample(&self, name: &str) -> Option<LoadedSample> {
        self.samples.read().await.get(name).cloned()
    }

    /// Sample names in sorted order
    pub async fn list_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.samples.read().await.keys().cloned().collect();
        names.sort();
        names
    }

    pub async fn len(&self) -> usize {
        self.samples.read().await.len()
    }

    /// Current samples without their provenance
    pub async fn snapshot(&self) -> SampleRegistry {
        let mut registry = SampleRegistry::new();
        for loaded in self.samples.read().await.values() {
            registry.add_sample(loaded.sample.clone());
        }
        registry
    }
}

fn is_sample_file(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("toml")
}

async fn load_all(dirs: &[(PathBuf, SamplePriority)], client: Option<&Client>) -> SampleMap {
    let mut samples = HashMap::new();

    let mut builtins = SampleRegistry::new();
    if let Err(e) = builtins.add_builtin_samples() {
        report(
            client,
            MessageType::ERROR,
            format!("Failed to load built-in samples, using blank skeleton: {}", e),
        )
        .await;
    }
    for sample in builtins.into_samples() {
        insert(&mut samples, sample, SamplePriority::BuiltIn, None);
    }

    for (dir, priority) in dirs {
        if let Err(e) = load_directory(dir, *priority, &mut samples, client).await {
            report(client, MessageType::ERROR, format!("{:#}", e)).await;
        }
    }

    samples
}

async fn load_directory(
    dir: &Path,
    priority: SamplePriority,
    samples: &mut SampleMap,
    client: Option<&Client>,
) -> Result<()> {
    if !dir.exists() {
        return Ok(());
    }

    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to read sample directory: {}", dir.display()))?;

    // Sort so that duplicate names within one directory resolve the same way
    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if is_sample_file(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    for path in paths {
        match load_file(&path).await {
            Ok(file) => {
                for sample in file.samples {
                    insert(samples, sample, priority, Some(path.clone()));
                }
            }
            Err(e) => {
                report(
                    client,
                    MessageType::ERROR,
                    format!("Failed to load sample file {}: {:#}", path.display(), e),
                )
                .await;
            }
        }
    }

    Ok(())
}

async fn load_file(path: &Path) -> Result<SampleFile> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read sample file: {}", path.display()))?;
    SampleFile::parse(&content)
        .with_context(|| format!("Failed to parse sample TOML: {}", path.display()))
}

fn insert(
    samples: &mut SampleMap,
    sample: Sample,
    priority: SamplePriority,
    source_path: Option<PathBuf>,
) {
    let should_load = match samples.get(&sample.name) {
        Some(existing) => priority >= existing.priority,
        None => true,
    };

    if should_load {
        samples.insert(
            sample.name.clone(),
            LoadedSample {
                sample,
                priority,
                source_path,
            },
        );
    }
}

/// Send a message to the client when connected, otherwise to the log
async fn report(client: Option<&Client>, kind: MessageType, message: impl Into<String>) {
    let message = message.into();
    match client {
        Some(client) => client.log_message(kind, message).await,
        None if kind == MessageType::ERROR => log::error!("{}", message),
        None => log::info!("{}", message),
    }
}
