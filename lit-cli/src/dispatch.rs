use std::path::{Path, PathBuf};

use lit_branch::{Branch, Tag};
use lit_diff::{Diff, DiffKind};
use lit_hash::Sha1;
use lit_object::Commit;
use lit_repository::{Repository, RepositoryError};

use crate::cli::Cli;
use crate::error::LitError;
use crate::session::Session;

/// Validate modifier-flag/action combinations `clap`'s derive can't express
/// declaratively (it only knows "at most one proper action"; it doesn't
/// know which modifiers go with which action).
fn validate(cli: &Cli) -> Result<(), LitError> {
    let any_action = cli.init
        || cli.commit
        || cli.rollback.is_some()
        || cli.checkout.is_some()
        || cli.log
        || cli.add.is_some()
        || cli.delete.is_some()
        || cli.add_branch.is_some()
        || cli.switch_branch.is_some()
        || cli.rebase_branch.is_some()
        || cli.delete_branch.is_some()
        || cli.clear_cache
        || cli.add_tag.is_some()
        || cli.delete_tag.is_some();
    if !any_action {
        return Err(LitError::MissingArgument("no action given".into()));
    }

    if cli.message.is_some() && !cli.commit {
        return Err(LitError::UnknownArgument("--message is only valid with --commit".into()));
    }
    if cli.from.is_some() && cli.add_branch.is_none() {
        return Err(LitError::UnknownArgument("--from is only valid with --add-branch".into()));
    }
    if cli.tag.is_some() && cli.rollback.is_none() && cli.checkout.is_none() {
        return Err(LitError::UnknownArgument(
            "--tag is only valid with --rollback or --checkout".into(),
        ));
    }
    if (cli.all || cli.no_recurse) && cli.add.is_none() && cli.delete.is_none() {
        return Err(LitError::UnknownArgument(
            "--all/--no-recurse are only valid with --add or --delete".into(),
        ));
    }
    if cli.all && cli.no_recurse {
        return Err(LitError::UnknownArgument("--all and --no-recurse are mutually exclusive".into()));
    }
    if (cli.filter.is_some() || cli.max_count.is_some() || cli.graph) && !cli.log {
        return Err(LitError::UnknownArgument(
            "--filter/--max-count/--graph are only valid with --log".into(),
        ));
    }
    if cli.hard && cli.delete_branch.is_none() {
        return Err(LitError::UnknownArgument("--hard is only valid with --delete-branch".into()));
    }
    Ok(())
}

fn readonly_guard(repo: &Repository) -> Result<(), LitError> {
    if repo.readonly {
        return Err(RepositoryError::ReadonlyViolation.into());
    }
    Ok(())
}

fn resolve_target(raw: &str, tag: Option<&str>, repo: &Repository) -> Result<Sha1, LitError> {
    if !raw.is_empty() {
        return Ok(Sha1::from_hex(raw)?);
    }
    let tag_name = tag.ok_or_else(|| {
        LitError::MissingArgument("rollback/checkout requires a hash or --tag <name>".into())
    })?;
    let tag = Tag::read(&repo.refs_tags_root(), tag_name)?;
    Ok(tag.commit_hash)
}

/// The most recent diff touching `rel_path` on `branch`, scanning its
/// commits from the head backward. Distinguishes a fresh `add` (no prior
/// diff, or the last one was a deletion) from a modification of an
/// already-tracked path.
fn find_last_diff_for_path<'a>(branch: &'a Branch, rel_path: &Path) -> Option<&'a Diff> {
    if branch.commits.is_empty() {
        return None;
    }
    let top = branch.head.min(branch.commits.len() - 1);
    for idx in (0..=top).rev() {
        if let Some(d) = branch.commits[idx]
            .changes
            .iter()
            .rev()
            .find(|d| d.new_path.as_path() == rel_path)
        {
            return Some(d);
        }
    }
    None
}

fn relative_to_root(root: &Path, given: &Path) -> PathBuf {
    given
        .strip_prefix(root)
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|_| given.to_path_buf())
}

/// Build the diff(s) a single `add`/`delete` invocation stages, given
/// whether it targets an existing tracked path or a fresh one.
fn stage_path(
    session: &mut Session,
    rel_path: &Path,
    deleting: bool,
    now: u64,
) -> Result<(), LitError> {
    let root = session.root.clone();
    let branch = session.repo.active_branch().clone();
    let full = root.join(rel_path);
    let is_folder = full.is_dir() || rel_path.as_os_str().to_string_lossy().ends_with('/');

    let diff = if deleting {
        if is_folder {
            Diff::folder_deleted(rel_path, now)
        } else {
            Diff::file_deleted_at(&root, rel_path, now)?
        }
    } else if is_folder {
        match find_last_diff_for_path(&branch, rel_path) {
            Some(d) if d.kind != DiffKind::FolderDeleted => {
                log::warn!("'{}' is already tracked as a folder", rel_path.display());
                return Ok(());
            }
            _ => Diff::folder_new(rel_path, now),
        }
    } else {
        match find_last_diff_for_path(&branch, rel_path) {
            Some(d) if d.kind != DiffKind::FileDeleted => {
                let old_content = lit_diff::forward_projection(&d.lines).join("\n");
                let old_content = if old_content.is_empty() {
                    String::new()
                } else {
                    format!("{old_content}\n")
                };
                let new_content = lit_utils::io::read_to_string(&full)?;
                Diff::file_modified(rel_path, rel_path, &old_content, &new_content, now)
            }
            _ => Diff::file_new_at(&root, rel_path, now)?,
        }
    };

    lit_repository::write_to_shelved(&session.repo.shelved_root(), &branch.name, &diff)?;
    log::info!("staged: {}", diff.summary_line());
    Ok(())
}

fn stage_recursive(
    session: &mut Session,
    rel_root: &Path,
    deleting: bool,
    recursive: bool,
    now: u64,
) -> Result<(), LitError> {
    let full_root = session.root.join(rel_root);
    stage_path(session, rel_root, deleting, now)?;
    if !full_root.is_dir() {
        return Ok(());
    }
    let entries = lit_utils::walk::walk(&full_root, recursive)?;
    for entry in entries {
        let rel = relative_to_root(&session.root, &entry.path);
        if deleting && entry.is_dir {
            continue; // the top-level folder_deleted already covers its children
        }
        stage_path(session, &rel, deleting, now)?;
    }
    Ok(())
}

fn print_log(view: &lit_repository::LogView) {
    println!("branch: {}", view.branch_name);
    println!("shelved: {}", view.shelved_count);
    for commit in &view.commits {
        println!("{}  {}  {}", commit.hash, commit.timestamp, commit.message);
    }
    for tag in &view.tags {
        println!("tag: {tag}");
    }
}

/// The single seam between parsed arguments and the engine: resolves the
/// active branch, loads shelved diffs as needed, and calls exactly one
/// engine operation. Returns the process exit code on success.
pub fn dispatch(session: &mut Session, cli: &Cli, now: u64) -> Result<i32, LitError> {
    validate(cli)?;

    if cli.commit {
        readonly_guard(&session.repo)?;
        let branch_name = session.repo.active_branch().name.clone();
        let diffs = lit_repository::consume_shelved(&session.repo.shelved_root(), &branch_name)?;
        let message = cli.message.clone().unwrap_or_default();
        let mut commit = Commit::create(message, now);
        for diff in diffs {
            commit.push_change(diff)?;
        }
        commit.write(&session.repo.objects_root())?;
        session.repo.active_branch_mut().append_commit(commit);
        let branch = session.repo.active_branch().clone();
        branch.write(&session.repo.refs_heads_root())?;
        session.repo.readonly = session.repo.active_branch().is_readonly();
        session.repo.write_index()?;
        return Ok(0);
    }

    if let Some(raw) = &cli.rollback {
        let target = resolve_target(raw, cli.tag.as_deref(), &session.repo)?;
        let root = session.root.clone();
        let branch = session.repo.active_branch_mut();
        lit_repository::rollback(branch, &target, &root)?;
        let branch = session.repo.active_branch().clone();
        branch.write(&session.repo.refs_heads_root())?;
        session.repo.readonly = session.repo.active_branch().is_readonly();
        session.repo.write_index()?;
        return Ok(0);
    }

    if let Some(raw) = &cli.checkout {
        let target = resolve_target(raw, cli.tag.as_deref(), &session.repo)?;
        let root = session.root.clone();
        let branch = session.repo.active_branch_mut();
        lit_repository::checkout(branch, &target, &root)?;
        let branch = session.repo.active_branch().clone();
        branch.write(&session.repo.refs_heads_root())?;
        session.repo.readonly = session.repo.active_branch().is_readonly();
        session.repo.write_index()?;
        return Ok(0);
    }

    if cli.log {
        let mut view = lit_repository::log_view(&session.repo)?;
        if let Some(filter) = &cli.filter {
            view.commits.retain(|c| c.message.contains(filter.as_str()));
        }
        if let Some(max) = cli.max_count {
            view.commits.truncate(max);
        }
        print_log(&view);
        return Ok(0);
    }

    if let Some(path) = &cli.add {
        readonly_guard(&session.repo)?;
        let rel = relative_to_root(&session.root, path);
        stage_recursive(session, &rel, false, !cli.no_recurse, now)?;
        return Ok(0);
    }

    if let Some(path) = &cli.delete {
        readonly_guard(&session.repo)?;
        let rel = relative_to_root(&session.root, path);
        stage_recursive(session, &rel, true, !cli.no_recurse, now)?;
        return Ok(0);
    }

    if let Some(name) = &cli.add_branch {
        readonly_guard(&session.repo)?;
        session
            .repo
            .create_branch_from(name, now, cli.from.as_deref())?;
        return Ok(0);
    }

    if let Some(name) = &cli.switch_branch {
        let root = session.root.clone();
        lit_repository::switch(&mut session.repo, name, &root)?;
        session.repo.write_index()?;
        return Ok(0);
    }

    if let Some(pair) = &cli.rebase_branch {
        readonly_guard(&session.repo)?;
        let (src, dst) = (pair[0].as_str(), pair[1].as_str());
        let root = session.root.clone();
        lit_repository::rebase_branch(&mut session.repo, dst, src, &root)?;
        return Ok(0);
    }

    if let Some(name) = &cli.delete_branch {
        readonly_guard(&session.repo)?;
        session.repo.delete_branch(name)?;
        return Ok(0);
    }

    if cli.clear_cache {
        let removed = lit_repository::scan_object_cache(&session.repo)?;
        println!("removed {removed} object(s)");
        return Ok(0);
    }

    if let Some(pair) = &cli.add_tag {
        readonly_guard(&session.repo)?;
        let (hash, name) = (pair[0].as_str(), pair[1].as_str());
        let commit_hash = Sha1::from_hex(hash)?;
        let branch = session.repo.active_branch();
        let tag = Tag::new(name, branch.hash, commit_hash);
        tag.write(&session.repo.refs_tags_root())?;
        return Ok(0);
    }

    if let Some(name) = &cli.delete_tag {
        readonly_guard(&session.repo)?;
        Tag::delete(&session.repo.refs_tags_root(), name)?;
        return Ok(0);
    }

    Err(LitError::MissingArgument("no action given".into()))
}
