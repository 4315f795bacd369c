use std::fs;
use std::path::Path;

/// Files every scenario can rely on, relative to the site root.
const FILES: &[(&str, &str)] = &[
    ("name.txt", "tobi"),
    ("nums.txt", "123456789"),
    ("empty.txt", ""),
    ("page.html", "<p>page</p>"),
    ("tobi.html", "<p>tobi</p>"),
    ("data.json", "{\"name\":\"tobi\"}"),
    ("pets/index.html", "tobi, loki, jane"),
    ("pets/names.txt", "tobi\nloki\njane\n"),
    ("with space.txt", "spaced"),
    (".hidden", "secret"),
    (".mine/name.txt", "tobi"),
    ("nested/.config/app.txt", "config"),
];

/// Directories with no index file.
const DIRS: &[&str] = &["empty", "docs"];

/// Writes the shared fixture tree under `root`.
pub fn write_fixture_tree(root: &Path) -> std::io::Result<()> {
    for (relative, contents) in FILES {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
    }

    for relative in DIRS {
        fs::create_dir_all(root.join(relative))?;
    }

    Ok(())
}
