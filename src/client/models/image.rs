//! Container image and vulnerability models (CWP `/api/v33.00/images`)

use serde::{Deserialize, Serialize};

/// A scanned container image with its deployment instances and CVE findings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(default)]
    pub repo_tag: Option<RepoTag>,

    #[serde(default)]
    pub instances: Vec<ImageInstance>,

    #[serde(default)]
    pub vulnerabilities: Vec<ImageVulnerability>,
}

/// Registry coordinates of an image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoTag {
    #[serde(default)]
    pub registry: Option<String>,

    #[serde(default)]
    pub repo: Option<String>,

    #[serde(default)]
    pub tag: Option<String>,
}

impl RepoTag {
    /// `registry/repo:tag` with empty segments elided.
    pub fn display(&self) -> String {
        let repo = self.repo.as_deref().unwrap_or("");
        let tag = self.tag.as_deref().unwrap_or("");
        match self.registry.as_deref() {
            Some(registry) if !registry.is_empty() => format!("{registry}/{repo}:{tag}"),
            _ => format!("{repo}:{tag}"),
        }
    }
}

/// One running deployment of an image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInstance {
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub registry: Option<String>,

    #[serde(default)]
    pub repo: Option<String>,
}

/// One CVE finding against an image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageVulnerability {
    #[serde(default)]
    pub cve: Option<String>,

    #[serde(default)]
    pub severity: Option<String>,

    #[serde(default)]
    pub cvss: Option<f64>,

    #[serde(default)]
    pub package_name: Option<String>,

    #[serde(default)]
    pub package_version: Option<String>,

    /// Fix status reported by the scanner, e.g. "fixed in 1.2.3"
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_image() {
        let image: Image = serde_json::from_str(
            r#"{
                "repoTag": {"registry": "registry.example.com", "repo": "web", "tag": "1.4"},
                "instances": [{"host": "node-1", "image": "web:1.4"}],
                "vulnerabilities": [
                    {"cve": "CVE-2024-0001", "severity": "critical", "cvss": 9.8,
                     "packageName": "openssl", "packageVersion": "1.1.1"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(image.instances.len(), 1);
        assert_eq!(image.vulnerabilities.len(), 1);
        assert_eq!(
            image.repo_tag.unwrap().display(),
            "registry.example.com/web:1.4"
        );
    }

    #[test]
    fn test_missing_lists_default_empty() {
        let image: Image = serde_json::from_str("{}").unwrap();
        assert!(image.instances.is_empty());
        assert!(image.vulnerabilities.is_empty());
    }

    #[test]
    fn test_repo_tag_display_without_registry() {
        let tag = RepoTag {
            registry: None,
            repo: Some("web".to_string()),
            tag: Some("latest".to_string()),
        };
        assert_eq!(tag.display(), "web:latest");
    }
}
