use crate::book::{Book, InputBook};
use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Load every book under `path`, a single catalog file or a directory walked
/// recursively. `.jsonl` files hold one JSON book per line; anything else is
/// read as tab-separated `id, title, author` lines.
pub fn load(path: &Path) -> Result<Vec<Book>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if path.is_dir() {
        for entry in WalkDir::new(path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            if entry.path().is_file() {
                files.push(entry.path().to_path_buf());
            }
        }
    } else if path.is_file() {
        files.push(path.to_path_buf());
    } else {
        return Err(anyhow!("catalog not found: {}", path.display()));
    }

    let mut books = Vec::new();
    for file in files {
        let before = books.len();
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            load_jsonl(&file, &mut books)?;
        } else {
            load_tab(&file, &mut books)?;
        }
        tracing::debug!(file = %file.display(), books = books.len() - before, "read catalog file");
    }
    Ok(books)
}

fn load_tab(file: &Path, books: &mut Vec<Book>) -> Result<()> {
    let reader = BufReader::new(File::open(file).with_context(|| format!("opening {}", file.display()))?);
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let book = parse_tab_line(&line).with_context(|| format!("{}:{}", file.display(), n + 1))?;
        books.push(book);
    }
    Ok(())
}

fn load_jsonl(file: &Path, books: &mut Vec<Book>) -> Result<()> {
    let reader = BufReader::new(File::open(file).with_context(|| format!("opening {}", file.display()))?);
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let input: InputBook = serde_json::from_str(&line).with_context(|| format!("{}:{}", file.display(), n + 1))?;
        if input.id.trim().is_empty() {
            return Err(anyhow!("{}:{}: missing book id", file.display(), n + 1));
        }
        books.push(Book::from(input));
    }
    Ok(())
}

/// `id<TAB>title<TAB>author`; fields past the third are appended to the author.
pub fn parse_tab_line(line: &str) -> Result<Book> {
    let mut fields = line.split('\t');
    let id = fields.next().unwrap_or("").trim();
    if id.is_empty() {
        return Err(anyhow!("missing book id"));
    }
    let title = fields.next().unwrap_or("");
    let author = fields.collect::<Vec<_>>().join(" ");
    Ok(Book::new(id, title, &author))
}
