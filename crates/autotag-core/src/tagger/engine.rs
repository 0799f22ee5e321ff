//! Tagger implementation
//!
//! The tagger composes rule resolution, tag normalization and block
//! patching. It holds no document state: every call reads a fresh snapshot
//! from the store and writes back only when the text changed.

use autotag_blocks::{BlockAction, ManagedBlock, Patch, find_block, plan_patch, validate_marker};
use autotag_fs::NormalizedPath;
use chrono::NaiveDateTime;

use crate::Result;
use crate::config::Settings;
use crate::rules::Resolution;
use crate::store::DocumentStore;
use crate::tags::{TagSet, normalize};

use super::event::DocumentEvent;
use super::report::{DocumentOutcome, EventOutcome, SyncOptions, SyncReport};
use super::stamp::{parse_timestamp_tag, stamped_path, timestamp_tag};

/// Keeps the managed tag block of every document in line with its folder.
///
/// Lifecycle handling:
/// - **created**: optional title stamp, rule tags, creation tag, unfiled tag
///   when no rule matched
/// - **renamed**: rule tags and creation tag for the new location; the
///   unfiled tag survives only when configured to, and a creation tag
///   already in the block is kept as is
/// - **apply_all**: reconciles every document as if it had been renamed in
///   place
pub struct Tagger<S> {
    settings: Settings,
    store: S,
}

impl<S: DocumentStore> Tagger<S> {
    /// Create a tagger over `store`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Blocks` if the configured marker cannot delimit a
    /// managed block.
    pub fn new(settings: Settings, store: S) -> Result<Self> {
        validate_marker(settings.marker())?;
        Ok(Self { settings, store })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Dispatch a lifecycle event.
    pub fn handle(&mut self, event: &DocumentEvent) -> Result<EventOutcome> {
        match event {
            DocumentEvent::Created { path } => self.on_created(path),
            DocumentEvent::Renamed { from, to } => {
                tracing::debug!(from = %from, to = %to, "document renamed");
                self.on_renamed(to)
            }
        }
    }

    /// Tag a newly created document.
    pub fn on_created(&mut self, path: &str) -> Result<EventOutcome> {
        let mut path = relative(path);
        if !self.settings.is_eligible(&path) {
            return Ok(EventOutcome::Skipped { path });
        }

        let created = self.store.created_at(&path)?;

        let mut renamed_from = None;
        if self.settings.stamp_title_on_create {
            let target = stamped_path(&path, created, |candidate| self.store.exists(candidate));
            if target != path {
                self.store.rename(&path, &target)?;
                tracing::info!(from = %path, to = %target, "stamped document title");
                renamed_from = Some(std::mem::replace(&mut path, target));
            }
        }

        let text = self.store.read(&path)?;
        let resolution = self.settings.resolver().resolve(&path);
        let add_unfiled = self.settings.add_unfiled_on_create && resolution.is_unmatched();
        let tags = self.build_tags(resolution, Some(created), add_unfiled);

        let mut outcome = self.commit(&path, &text, tags)?;
        outcome.renamed_from = renamed_from;
        Ok(EventOutcome::Tagged(outcome))
    }

    /// Re-tag a document at its new location.
    pub fn on_renamed(&mut self, path: &str) -> Result<EventOutcome> {
        let path = relative(path);
        if !self.settings.is_eligible(&path) {
            return Ok(EventOutcome::Skipped { path });
        }
        self.reconcile(&path, false).map(EventOutcome::Tagged)
    }

    /// Reconcile every eligible document in the store.
    ///
    /// A failing document is logged and recorded in the report; the run
    /// continues with the next one.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store cannot list its documents.
    pub fn apply_all(&mut self, options: &SyncOptions) -> Result<SyncReport> {
        let documents = self.store.list_documents()?;
        let mut report = SyncReport::new(options);

        for path in documents {
            if !self.settings.is_eligible(&path) {
                report.skipped += 1;
                continue;
            }
            match self.reconcile(&path, options.dry_run) {
                Ok(outcome) => report.record(outcome),
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "failed to tag document");
                    report.record_error(&path, e.to_string());
                }
            }
        }

        tracing::info!(
            changed = report.changed.len(),
            unchanged = report.unchanged,
            errors = report.errors.len(),
            dry_run = options.dry_run,
            "tagging run finished"
        );
        Ok(report)
    }

    /// Compute what reconciling `path` would do, without writing.
    pub fn preview(&self, path: &str) -> Result<DocumentOutcome> {
        let path = relative(path);
        let (patch, tags) = self.plan(&path)?;
        Ok(DocumentOutcome {
            path,
            renamed_from: None,
            action: patch.action,
            written: false,
            tags,
        })
    }

    /// Tags a document at `path` should carry outside of creation.
    ///
    /// `previous` is the document's current managed block, consulted for the
    /// unfiled tag. `created` adds the creation tag when stamping is enabled.
    pub fn tags_for(
        &self,
        path: &str,
        previous: Option<&ManagedBlock>,
        created: Option<NaiveDateTime>,
    ) -> TagSet {
        let resolution = self.settings.resolver().resolve(path);

        let previous_unfiled = match (previous, self.settings.unfiled()) {
            (Some(block), Some(unfiled)) => block.contains_token(&unfiled),
            _ => false,
        };
        // Fallback and rule tags never coexist
        let keep_unfiled = !self.settings.remove_unfiled_on_rename
            && previous_unfiled
            && resolution.is_unmatched();

        self.build_tags(resolution, created, keep_unfiled)
    }

    fn build_tags(
        &self,
        resolution: Resolution,
        created: Option<NaiveDateTime>,
        add_unfiled: bool,
    ) -> TagSet {
        let mut tags = normalize(resolution.tags);
        if self.settings.stamp_created_tag
            && let Some(created) = created
        {
            tags.insert(&timestamp_tag(created));
        }
        if add_unfiled && let Some(unfiled) = self.settings.unfiled() {
            tags.insert(&unfiled);
        }
        tags
    }

    fn plan(&self, path: &str) -> Result<(Patch, TagSet)> {
        let text = self.store.read(path)?;
        let previous = find_block(&text, self.settings.marker());
        let created = if self.settings.stamp_created_tag {
            match previous.as_ref().and_then(recorded_creation) {
                Some(created) => Some(created),
                None => Some(self.store.created_at(path)?),
            }
        } else {
            None
        };
        let tags = self.tags_for(path, previous.as_ref(), created);
        let patch = plan_patch(&text, self.settings.marker(), tags.as_slice())?;
        Ok((patch, tags))
    }

    fn reconcile(&mut self, path: &str, dry_run: bool) -> Result<DocumentOutcome> {
        let (patch, tags) = self.plan(path)?;
        self.write_patch(path, patch, tags, dry_run)
    }

    fn commit(&mut self, path: &str, text: &str, tags: TagSet) -> Result<DocumentOutcome> {
        let patch = plan_patch(text, self.settings.marker(), tags.as_slice())?;
        self.write_patch(path, patch, tags, false)
    }

    fn write_patch(
        &mut self,
        path: &str,
        patch: Patch,
        tags: TagSet,
        dry_run: bool,
    ) -> Result<DocumentOutcome> {
        let written = patch.is_changed() && !dry_run;
        if written {
            self.store.write(path, &patch.text)?;
            tracing::info!(path, action = %patch.action, tags = %tags, "updated tag block");
        } else if patch.action == BlockAction::Unchanged {
            tracing::debug!(path, "tag block already current");
        } else {
            tracing::debug!(path, action = %patch.action, "dry run, not writing");
        }

        Ok(DocumentOutcome {
            path: path.to_string(),
            renamed_from: None,
            action: patch.action,
            written,
            tags,
        })
    }
}

/// The creation time an earlier run stamped into `block`.
///
/// Once stamped, this wins over the store's creation time, which can drift
/// when documents are copied or the filesystem records no birth time.
fn recorded_creation(block: &ManagedBlock) -> Option<NaiveDateTime> {
    block
        .lines()
        .flat_map(str::split_whitespace)
        .find_map(parse_timestamp_tag)
}

fn relative(path: &str) -> String {
    NormalizedPath::new(path).as_relative().to_string()
}
