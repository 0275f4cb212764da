//! Directory listing for `GET /`.

use std::path::Path;

use crate::config::ServedRoot;
use crate::error::ServeError;
use crate::files::size::format_size;
use crate::http::response::Response;

/// Directories order before files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    Directory,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub kind: EntryKind,
    /// Present for files only.
    pub size_bytes: Option<u64>,
}

/// Reads the direct children of the root. Unreadable entries are skipped.
pub async fn read_entries(root: &ServedRoot) -> Result<Vec<FileEntry>, ServeError> {
    let mut dir = tokio::fs::read_dir(root.path()).await?;
    let mut entries = Vec::new();

    while let Some(entry) = dir.next_entry().await? {
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                tracing::warn!(name = ?raw, "Skipping entry with non UTF-8 name");
                continue;
            }
        };

        // Follows symlinks, so a link to a directory lists as a directory.
        let meta = match tokio::fs::metadata(entry.path()).await {
            Ok(meta) => meta,
            Err(e) => {
                tracing::warn!(name = %name, error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        if meta.is_dir() {
            entries.push(FileEntry {
                name,
                kind: EntryKind::Directory,
                size_bytes: None,
            });
        } else if meta.is_file() {
            entries.push(FileEntry {
                name,
                kind: EntryKind::File,
                size_bytes: Some(meta.len()),
            });
        }
    }

    Ok(entries)
}

/// Directories first, then files; case-insensitive by name within each group.
pub fn sort_entries(entries: &mut [FileEntry]) {
    entries.sort_by_cached_key(|e| (e.kind, e.name.to_lowercase()));
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>File server</title>
    <meta charset="utf-8">
    <style>
        body { font-family: Arial, sans-serif; margin: 40px; }
        h1 { color: #333; }
        table { border-collapse: collapse; width: 100%; }
        th, td { padding: 10px; text-align: left; border-bottom: 1px solid #ddd; }
        th { background-color: #f2f2f2; }
        .dir { color: #0066cc; font-weight: bold; }
        .file { color: #333; }
        .size { color: #666; font-size: 0.9em; }
        .upload-form { margin: 20px 0; padding: 20px; background: #f9f9f9; border-radius: 5px; }
    </style>
</head>
<body>
"#;

/// Renders the listing page for already sorted entries.
pub fn render_listing(root: &Path, entries: &[FileEntry]) -> String {
    let mut html = String::from(PAGE_HEAD);

    html.push_str("    <h1>File server</h1>\n");
    html.push_str(&format!(
        "    <p>Serving: <strong>{}</strong></p>\n",
        escape_html(&root.display().to_string())
    ));
    html.push_str(
        r#"    <div class="upload-form">
        <h3>Upload a file</h3>
        <form method="post" action="/upload" enctype="multipart/form-data">
            <input type="file" name="file" required>
            <input type="submit" value="Upload">
        </form>
    </div>
    <table>
        <tr><th>Name</th><th>Size</th><th>Actions</th></tr>
"#,
    );

    for entry in entries {
        let name = escape_html(&entry.name);
        match entry.kind {
            EntryKind::Directory => html.push_str(&format!(
                "        <tr><td class=\"dir\">{name}/</td><td class=\"size\">[DIR]</td><td>-</td></tr>\n"
            )),
            EntryKind::File => {
                let size = format_size(entry.size_bytes.unwrap_or(0));
                let href = urlencoding::encode(&entry.name);
                html.push_str(&format!(
                    "        <tr><td class=\"file\">{name}</td><td class=\"size\">{size}</td><td><a href=\"/download/{href}\">Download</a></td></tr>\n"
                ));
            }
        }
    }

    html.push_str("    </table>\n</body>\n</html>\n");
    html
}

/// `GET /`
pub async fn handle(root: &ServedRoot) -> Result<Response, ServeError> {
    let mut entries = read_entries(root).await?;
    sort_entries(&mut entries);
    tracing::debug!(entries = entries.len(), "Rendering listing");
    Ok(Response::html(render_listing(root.path(), &entries)))
}
