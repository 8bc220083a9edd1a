use figment::providers::{Data, Format, Json, Toml, Yaml};
use figment::value::{Dict, Map};
use figment::{Error, Metadata, Profile, Provider};
use std::path::Path;

/// Provider for a user-named config file, picked by extension
///
/// Unknown extensions are sniffed from the content and fall back to TOML.
pub fn auto<P: AsRef<Path>>(path: P) -> impl Provider {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    let format = match extension.as_str() {
        "toml" => "toml",
        "json" => "json",
        "yaml" | "yml" => "yaml",
        _ => std::fs::read_to_string(path)
            .ok()
            .and_then(|content| detect_format_from_content(&content))
            .unwrap_or("toml"),
    };

    match format {
        "json" => SmartProvider::Json(Json::file(path)),
        "yaml" => SmartProvider::Yaml(Yaml::file(path)),
        _ => SmartProvider::Toml(Toml::file(path)),
    }
}

enum SmartProvider {
    Toml(Data<Toml>),
    Json(Data<Json>),
    Yaml(Data<Yaml>),
}

impl Provider for SmartProvider {
    fn metadata(&self) -> Metadata {
        match self {
            SmartProvider::Toml(p) => p.metadata(),
            SmartProvider::Json(p) => p.metadata(),
            SmartProvider::Yaml(p) => p.metadata(),
        }
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        match self {
            SmartProvider::Toml(p) => p.data(),
            SmartProvider::Json(p) => p.data(),
            SmartProvider::Yaml(p) => p.data(),
        }
    }
}

fn detect_format_from_content(content: &str) -> Option<&'static str> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('{') {
        return Some("json");
    }
    if trimmed.starts_with('[') || trimmed.lines().any(|l| l.contains(" = ")) {
        return Some("toml");
    }
    if trimmed.lines().any(|l| l.trim_end().ends_with(':') || l.contains(": ")) {
        return Some("yaml");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format_from_content(r#"{"search": {}}"#), Some("json"));
        assert_eq!(detect_format_from_content("[search]\nmax_length = 3"), Some("toml"));
        assert_eq!(detect_format_from_content("search:\n  max_length: 3"), Some("yaml"));
        assert_eq!(detect_format_from_content("plain words"), None);
    }
}
