//! Utility functions

use crate::constants::APP_NAME;
use crate::types::SyncSource;
use std::path::{Path, PathBuf};

// Square viewBox — for window/taskbar icons and the top-bar logo
pub const ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 256 256"><path fill="#818cf8" d="M128 24a104 104 0 0 1 73.5 30.5L224 32v64h-64l24.4-24.4A72 72 0 1 0 200 128h32A104 104 0 1 1 128 24Z"/><circle cx="128" cy="128" r="34" fill="#c7d2fe"/></svg>"##;

/// Rasterize the icon SVG to a square image (for window/taskbar icons).
pub fn rasterize_logo_square(size: u32) -> (Vec<u8>, u32, u32) {
    let tree = resvg::usvg::Tree::from_str(ICON_SVG, &resvg::usvg::Options::default()).unwrap();
    let scale = size as f32 / tree.size().width();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size).unwrap();
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    (premul_to_straight(&pixmap), size, size)
}

fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

/// Get the app data directory path
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Resolved fetch target of a sync source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Url(String),
    File(PathBuf),
}

/// Resolve a source to its fetch target. Remote sources assemble a URL from
/// protocol + path; local sources resolve relative paths against the app
/// data directory and expand a leading `~`.
pub fn resolve_target(source: &SyncSource, data_dir: &Path) -> Target {
    if source.protocol.is_remote() {
        return Target::Url(format!("{}://{}", source.protocol.label(), source.path));
    }

    let raw = Path::new(&source.path);
    let path = if let Ok(rest) = raw.strip_prefix("~") {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(rest)
    } else if raw.is_relative() {
        data_dir.join(raw)
    } else {
        raw.to_path_buf()
    };
    Target::File(path)
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PayloadFormat, Protocol};

    fn source(protocol: Protocol, path: &str) -> SyncSource {
        SyncSource {
            id: "x".into(),
            name: "x".into(),
            path: path.into(),
            protocol,
            format: PayloadFormat::Json,
            tags: Vec::new(),
            enabled: true,
            last_updated: None,
        }
    }

    #[test]
    fn remote_targets_join_scheme_and_path() {
        let data_dir = PathBuf::from("/data");
        assert_eq!(
            resolve_target(&source(Protocol::Https, "example.com/p.json"), &data_dir),
            Target::Url("https://example.com/p.json".into())
        );
        assert_eq!(
            resolve_target(&source(Protocol::Http, "10.0.0.2:8000/p.csv"), &data_dir),
            Target::Url("http://10.0.0.2:8000/p.csv".into())
        );
    }

    #[test]
    fn local_relative_paths_resolve_against_data_dir() {
        let data_dir = PathBuf::from("/data");
        assert_eq!(
            resolve_target(&source(Protocol::Local, "drop/p.json"), &data_dir),
            Target::File(PathBuf::from("/data/drop/p.json"))
        );
        assert_eq!(
            resolve_target(&source(Protocol::Local, "/abs/p.csv"), &data_dir),
            Target::File(PathBuf::from("/abs/p.csv"))
        );
    }
}
