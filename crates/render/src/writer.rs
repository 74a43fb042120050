//! Writing generated pages to disk, staleness checks and pruning

use crate::index::{render_index, INDEX_FILE_NAME};
use crate::markdown::{render_agent, Notice};
use catalog::Catalog;
use shared::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One generated file, relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub file_name: String,
    pub content: String,
}

/// What happened to a page on write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

/// Why a generated file is out of date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    Missing,
    Outdated,
}

impl Staleness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Staleness::Missing => "missing",
            Staleness::Outdated => "outdated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StalePage {
    pub path: PathBuf,
    pub reason: Staleness,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub written: usize,
    pub unchanged: usize,
    pub pruned: Vec<PathBuf>,
}

/// Render every agent page, plus the index when requested
pub fn render_catalog(catalog: &Catalog, notice: &Notice, with_index: bool) -> Vec<GeneratedPage> {
    let mut pages: Vec<GeneratedPage> = catalog
        .agents()
        .map(|agent| GeneratedPage {
            file_name: crate::markdown::page_file_name(&agent.name),
            content: render_agent(agent, notice),
        })
        .collect();

    if with_index {
        pages.push(GeneratedPage {
            file_name: INDEX_FILE_NAME.to_string(),
            content: render_index(catalog, notice),
        });
    }
    pages
}

/// Write a page unless the file already holds identical content
pub fn write_page(out_dir: &Path, page: &GeneratedPage) -> Result<WriteOutcome> {
    let path = out_dir.join(&page.file_name);
    if let Ok(existing) = std::fs::read_to_string(&path) {
        if existing == page.content {
            debug!(path = %path.display(), "Page unchanged");
            return Ok(WriteOutcome::Unchanged);
        }
    }

    std::fs::create_dir_all(out_dir)?;
    std::fs::write(&path, &page.content)?;
    debug!(path = %path.display(), "Wrote page");
    Ok(WriteOutcome::Written)
}

/// Write every page and return counts. `on_page` sees each outcome as it happens.
pub fn write_pages<F>(out_dir: &Path, pages: &[GeneratedPage], mut on_page: F) -> Result<RenderSummary>
where
    F: FnMut(&GeneratedPage, WriteOutcome),
{
    let mut summary = RenderSummary::default();
    for page in pages {
        let outcome = write_page(out_dir, page)?;
        match outcome {
            WriteOutcome::Written => summary.written += 1,
            WriteOutcome::Unchanged => summary.unchanged += 1,
        }
        on_page(page, outcome);
    }
    info!(
        written = summary.written,
        unchanged = summary.unchanged,
        out_dir = %out_dir.display(),
        "Rendered catalog"
    );
    Ok(summary)
}

/// Compare rendered pages with the files on disk, ignoring the notice line
pub fn check_pages(out_dir: &Path, pages: &[GeneratedPage], notice: &Notice) -> Vec<StalePage> {
    pages
        .iter()
        .filter_map(|page| {
            let path = out_dir.join(&page.file_name);
            let reason = match std::fs::read_to_string(&path) {
                Err(_) => Staleness::Missing,
                Ok(existing) if same_body(&existing, &page.content, notice) => return None,
                Ok(_) => Staleness::Outdated,
            };
            Some(StalePage { path, reason })
        })
        .collect()
}

fn same_body(a: &str, b: &str, notice: &Notice) -> bool {
    let body = |s: &str| -> Vec<String> {
        s.lines()
            .filter(|l| !notice.is_notice_line(l))
            .map(|l| l.trim_end().to_string())
            .collect()
    };
    body(a) == body(b)
}

/// Delete generated Markdown files that no longer correspond to a page.
///
/// Only files carrying the notice are touched; hand-written files survive.
pub fn prune(out_dir: &Path, pages: &[GeneratedPage], notice: &Notice) -> Result<Vec<PathBuf>> {
    if !out_dir.exists() {
        return Ok(Vec::new());
    }

    let keep: HashSet<&str> = pages.iter().map(|p| p.file_name.as_str()).collect();
    let mut pruned = Vec::new();

    let mut entries: Vec<PathBuf> = std::fs::read_dir(out_dir)?
        .map(|e| e.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    entries.sort();

    for path in entries {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let is_markdown = path.extension().is_some_and(|e| e == "md");
        if !path.is_file() || !is_markdown || keep.contains(file_name) {
            continue;
        }

        let content = std::fs::read_to_string(&path)?;
        if content.lines().any(|l| notice.is_notice_line(l)) {
            std::fs::remove_file(&path)?;
            warn!(path = %path.display(), "Pruned generated page with no definition");
            pruned.push(path);
        }
    }
    Ok(pruned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::AgentDefinition;

    fn catalog(names: &[&str]) -> Catalog {
        Catalog::from_definitions(
            names.iter().map(|n| AgentDefinition::new(*n, "Role")),
            Vec::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_render_catalog_with_index() {
        let notice = Notice::new("Auto-generated.");
        let pages = render_catalog(&catalog(&["b", "a"]), &notice, true);

        let names: Vec<&str> = pages.iter().map(|p| p.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.md", "b.md", "README.md"]);

        let without = render_catalog(&catalog(&["a"]), &notice, false);
        assert_eq!(without.len(), 1);
    }

    #[test]
    fn test_write_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("docs");
        let pages = render_catalog(&catalog(&["a", "b"]), &Notice::new("n"), true);

        let first = write_pages(&out, &pages, |_, _| {}).unwrap();
        assert_eq!(first.written, 3);
        assert_eq!(first.unchanged, 0);

        let mut seen = Vec::new();
        let second = write_pages(&out, &pages, |page, outcome| {
            seen.push((page.file_name.clone(), outcome))
        })
        .unwrap();
        assert_eq!(seen.len(), 3);
        assert!(seen.iter().all(|(_, o)| *o == WriteOutcome::Unchanged));
        assert_eq!(second.written, 0);
        assert_eq!(second.unchanged, 3);
        assert!(out.join("a.md").exists());
    }

    #[test]
    fn test_check_detects_missing_and_outdated() {
        let dir = tempfile::tempdir().unwrap();
        let notice = Notice::new("Auto-generated.");
        let pages = render_catalog(&catalog(&["a", "b"]), &notice, false);
        write_pages(dir.path(), &pages, |_, _| {}).unwrap();

        assert!(check_pages(dir.path(), &pages, &notice).is_empty());

        std::fs::remove_file(dir.path().join("a.md")).unwrap();
        std::fs::write(dir.path().join("b.md"), "# edited by hand\n").unwrap();

        let stale = check_pages(dir.path(), &pages, &notice);
        assert_eq!(stale.len(), 2);
        assert_eq!(stale[0].reason, Staleness::Missing);
        assert_eq!(stale[1].reason, Staleness::Outdated);
    }

    #[test]
    fn test_check_ignores_notice_date() {
        let dir = tempfile::tempdir().unwrap();
        let old = Notice {
            text: "Auto-generated.".to_string(),
            generated_on: Some("2025-01-01".to_string()),
        };
        let new = Notice {
            generated_on: Some("2026-06-30".to_string()),
            ..old.clone()
        };

        write_pages(dir.path(), &render_catalog(&catalog(&["a"]), &old, false), |_, _| {}).unwrap();
        let fresh = render_catalog(&catalog(&["a"]), &new, false);

        assert!(check_pages(dir.path(), &fresh, &new).is_empty());
    }

    #[test]
    fn test_prune_only_generated_orphans() {
        let dir = tempfile::tempdir().unwrap();
        let notice = Notice::new("Auto-generated.");

        write_pages(dir.path(), &render_catalog(&catalog(&["a", "gone"]), &notice, false), |_, _| {}).unwrap();
        std::fs::write(dir.path().join("NOTES.md"), "# hand written\n").unwrap();
        std::fs::write(dir.path().join("other.txt"), "*Auto-generated.*\n").unwrap();

        let pages = render_catalog(&catalog(&["a"]), &notice, false);
        let pruned = prune(dir.path(), &pages, &notice).unwrap();

        assert_eq!(pruned, vec![dir.path().join("gone.md")]);
        assert!(dir.path().join("a.md").exists());
        assert!(dir.path().join("NOTES.md").exists());
        assert!(dir.path().join("other.txt").exists());
    }

    #[test]
    fn test_prune_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let pruned = prune(&dir.path().join("none"), &[], &Notice::new("n")).unwrap();
        assert!(pruned.is_empty());
    }
}
