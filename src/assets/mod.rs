//! # Asset Index
//!
//! 정적 이미지 디렉터리를 훑어 프론트엔드가 읽는 JSON 인덱스를 만듭니다.
//!
//! ```text
//! scan_assets(root, ["png", "webp"])   → ["items/sword.png", "logo.png"]
//! build_flat_index("/assets", files)   → ["/assets/items/sword.png", "/assets/logo.png"]
//! build_grouped_index("/assets", files)→ { "": ["/assets/logo.png"], "items": ["/assets/items/sword.png"] }
//! ```
//!
//! 경로 구분자는 운영체제와 관계없이 항상 `/`입니다.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use serde_json::Value;
use crate::core::errors::{AppResult, ErrorContext};

/// `root` 아래에서 확장자가 일치하는 파일의 상대 경로를 정렬해 반환합니다.
///
/// 확장자는 대소문자를 구분하지 않고, 빈 목록이면 모든 파일을 포함합니다.
/// `.`으로 시작하는 파일과 디렉터리는 건너뜁니다. 디렉터리를 가리키는 심볼릭 링크는
/// 따라가지 않고, 파일을 가리키는 링크는 일반 파일처럼 포함합니다.
pub fn scan_assets(root: &Path, extensions: &[String]) -> AppResult<Vec<String>> {
    let wanted: Vec<String> = extensions
        .iter()
        .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
        .collect();

    let mut files = Vec::new();
    scan_dir(root, "", &wanted, &mut files)?;
    files.sort();

    Ok(files)
}

fn scan_dir(dir: &Path, relative: &str, wanted: &[String], files: &mut Vec<String>) -> AppResult<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("디렉터리를 읽을 수 없습니다: {}", dir.display()))?;

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("디렉터리 항목을 읽을 수 없습니다 ({}): {}", dir.display(), e);
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        let child = if relative.is_empty() {
            name.clone()
        } else {
            format!("{}/{}", relative, name)
        };

        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(e) => {
                log::warn!("파일 형식을 확인할 수 없습니다 ({}): {}", path.display(), e);
                continue;
            }
        };

        if file_type.is_dir() {
            scan_dir(&path, &child, wanted, files)?;
        } else if file_type.is_symlink() && !path.is_file() {
            log::debug!("디렉터리 링크는 건너뜁니다: {}", path.display());
        } else if matches_extension(&name, wanted) {
            files.push(child);
        }
    }

    Ok(())
}

fn matches_extension(name: &str, wanted: &[String]) -> bool {
    if wanted.is_empty() {
        return true;
    }

    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| wanted.iter().any(|w| w.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

fn join_prefix(prefix: &str, file: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        file.to_string()
    } else {
        format!("{}/{}", prefix, file)
    }
}

/// `["{prefix}/{file}", ...]`
pub fn build_flat_index(prefix: &str, files: &[String]) -> Value {
    Value::from(
        files
            .iter()
            .map(|file| join_prefix(prefix, file))
            .collect::<Vec<_>>(),
    )
}

/// 첫 번째 디렉터리 이름으로 묶은 인덱스. 루트에 있는 파일은 `""` 키 아래에 들어갑니다.
pub fn build_grouped_index(prefix: &str, files: &[String]) -> Value {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for file in files {
        let group = match file.split_once('/') {
            Some((dir, _)) => dir.to_string(),
            None => String::new(),
        };
        groups.entry(group).or_default().push(join_prefix(prefix, file));
    }

    serde_json::json!(groups)
}

/// 들여쓰기된 JSON에 줄바꿈을 붙여 기록합니다. 상위 디렉터리가 없으면 만듭니다.
pub fn write_index(path: &Path, value: &Value) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("디렉터리를 만들 수 없습니다: {}", parent.display()))?;
    }

    let mut json = serde_json::to_string_pretty(value).context("인덱스 직렬화 실패")?;
    json.push('\n');

    fs::write(path, json).with_context(|| format!("인덱스를 쓸 수 없습니다: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        fs::create_dir_all(root.join("items/weapons")).unwrap();
        fs::create_dir_all(root.join("avatars")).unwrap();
        fs::create_dir_all(root.join(".cache")).unwrap();

        fs::write(root.join("logo.PNG"), b"x").unwrap();
        fs::write(root.join("readme.txt"), b"x").unwrap();
        fs::write(root.join(".hidden.png"), b"x").unwrap();
        fs::write(root.join(".cache/thumb.png"), b"x").unwrap();
        fs::write(root.join("items/weapons/sword.webp"), b"x").unwrap();
        fs::write(root.join("items/shield.png"), b"x").unwrap();
        fs::write(root.join("avatars/default.png"), b"x").unwrap();

        dir
    }

    #[test]
    fn test_scan_assets_filters_and_sorts() {
        let dir = fixture();
        let files = scan_assets(dir.path(), &["png".to_string(), ".webp".to_string()]).unwrap();

        assert_eq!(files, vec![
            "avatars/default.png",
            "items/shield.png",
            "items/weapons/sword.webp",
            "logo.PNG",
        ]);
    }

    #[test]
    fn test_scan_assets_without_extensions_lists_everything_visible() {
        let dir = fixture();
        let files = scan_assets(dir.path(), &[]).unwrap();

        assert_eq!(files.len(), 5);
        assert!(files.contains(&"readme.txt".to_string()));
        assert!(files.iter().all(|f| !f.contains(".cache") && !f.contains(".hidden")));
    }

    #[test]
    fn test_scan_assets_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_assets(&dir.path().join("missing"), &[]).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_assets_does_not_follow_directory_links() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        fs::create_dir_all(root.join("items")).unwrap();
        fs::write(root.join("items/a.png"), b"x").unwrap();
        fs::write(root.join("b.png"), b"x").unwrap();
        std::os::unix::fs::symlink(root, root.join("items/loop")).unwrap();
        std::os::unix::fs::symlink(root.join("b.png"), root.join("items/alias.png")).unwrap();

        let files = scan_assets(root, &["png".to_string()]).unwrap();

        assert_eq!(files, vec!["b.png", "items/a.png", "items/alias.png"]);
    }

    #[test]
    fn test_build_flat_index() {
        let files = vec!["a.png".to_string(), "items/b.png".to_string()];

        assert_eq!(
            build_flat_index("/assets/", &files),
            json!(["/assets/a.png", "/assets/items/b.png"])
        );
        assert_eq!(build_flat_index("", &files), json!(["a.png", "items/b.png"]));
    }

    #[test]
    fn test_build_grouped_index() {
        let files = vec![
            "logo.png".to_string(),
            "items/a.png".to_string(),
            "items/weapons/b.png".to_string(),
            "avatars/c.png".to_string(),
        ];

        assert_eq!(
            build_grouped_index("/img", &files),
            json!({
                "": ["/img/logo.png"],
                "avatars": ["/img/avatars/c.png"],
                "items": ["/img/items/a.png", "/img/items/weapons/b.png"],
            })
        );
    }

    #[test]
    fn test_write_index_creates_parent_and_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("public/index.json");

        write_index(&out, &json!(["a.png"])).unwrap();

        let written = fs::read_to_string(&out).unwrap();
        assert!(written.ends_with("]\n"));
        assert_eq!(serde_json::from_str::<Value>(&written).unwrap(), json!(["a.png"]));
    }
}
