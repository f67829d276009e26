use crate::domain::model::ProjectKind;
use crate::domain::ports::Repository;
use crate::utils::error::{ReleaseError, Result};
use quick_xml::events::Event;
use quick_xml::reader::Reader;

/// Detects the project type from the manifests present at `HEAD`.
/// `pom.xml` takes precedence over `package.json`.
pub fn detect_project<R: Repository + ?Sized>(repo: &R) -> Result<ProjectKind> {
    for kind in [ProjectKind::Maven, ProjectKind::NodeJs] {
        if let Some(file) = kind.manifest_file() {
            if repo.file_at_head(file)?.is_some() {
                return Ok(kind);
            }
        }
    }
    Ok(ProjectKind::Unknown)
}

/// Reads the declared project version from the manifest at `HEAD`.
pub fn read_version<R: Repository + ?Sized>(repo: &R, kind: ProjectKind) -> Result<String> {
    let file = kind.manifest_file().ok_or_else(|| ReleaseError::UnsupportedProject {
        workspace: repo.workspace().to_string(),
    })?;

    let content = repo
        .file_at_head(file)?
        .ok_or_else(|| ReleaseError::manifest(file, "file not found at HEAD"))?;

    match kind {
        ProjectKind::Maven => {
            let xml = String::from_utf8(content)
                .map_err(|e| ReleaseError::manifest(file, format!("not UTF-8: {}", e)))?;
            maven_version(&xml)
        }
        ProjectKind::NodeJs => node_version(&content),
        ProjectKind::Unknown => Err(ReleaseError::UnsupportedProject {
            workspace: repo.workspace().to_string(),
        }),
    }
}

/// Text of `<project><version>`, ignoring namespaces and nested versions.
pub fn maven_version(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                path.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }
            Ok(Event::End(_)) => {
                path.pop();
            }
            Ok(Event::Text(text)) if path == ["project", "version"] => {
                let version = text
                    .unescape()
                    .map_err(|e| ReleaseError::manifest("pom.xml", e.to_string()))?;
                let version = version.trim();
                if !version.is_empty() {
                    return Ok(version.to_string());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ReleaseError::manifest(
                    "pom.xml",
                    format!("XML error at position {}: {}", reader.error_position(), e),
                ))
            }
            _ => {}
        }
    }

    Err(ReleaseError::manifest(
        "pom.xml",
        "no <version> element under <project>",
    ))
}

pub fn node_version(content: &[u8]) -> Result<String> {
    let package: serde_json::Value = serde_json::from_slice(content)?;
    package
        .get("version")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| ReleaseError::manifest("package.json", "missing string field \"version\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <parent>
    <groupId>org.example</groupId>
    <artifactId>parent</artifactId>
    <version>9.9.9</version>
  </parent>
  <artifactId>demo</artifactId>
  <dependencies>
    <dependency>
      <artifactId>lib</artifactId>
      <version>0.0.1</version>
    </dependency>
  </dependencies>
  <version>2.3.1</version>
</project>"#;

    #[test]
    fn test_maven_version_ignores_nested_versions() {
        assert_eq!(maven_version(POM).unwrap(), "2.3.1");
    }

    #[test]
    fn test_maven_version_without_namespace() {
        let pom = "<project><version> 1.0.0-SNAPSHOT </version></project>";
        assert_eq!(maven_version(pom).unwrap(), "1.0.0-SNAPSHOT");
    }

    #[test]
    fn test_maven_version_missing() {
        let pom = "<project><parent><version>1.0</version></parent></project>";
        assert!(matches!(
            maven_version(pom),
            Err(ReleaseError::ManifestError { .. })
        ));
    }

    #[test]
    fn test_node_version() {
        let pkg = br#"{"name": "demo", "version": "0.4.2"}"#;
        assert_eq!(node_version(pkg).unwrap(), "0.4.2");
        assert!(node_version(br#"{"name": "demo"}"#).is_err());
        assert!(node_version(br#"{"version": 3}"#).is_err());
        assert!(matches!(
            node_version(b"not json"),
            Err(ReleaseError::SerializationError(_))
        ));
    }
}
