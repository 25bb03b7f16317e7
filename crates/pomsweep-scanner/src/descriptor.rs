//! POM descriptor parsing
//!
//! A streaming `quick-xml` pass over a `pom.xml`, collecting only what the
//! resolver needs: the artifact's own coordinates, the `<parent>` reference,
//! declared and managed dependencies, packaging, and `<properties>`. Element
//! paths are matched exactly, so dependencies declared inside `<profiles>`
//! or `<build>` plugins never leak into the model.

use std::collections::BTreeMap;

use quick_xml::Reader;
use quick_xml::events::Event;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("malformed XML: {0}")]
    Xml(String),
    #[error("descriptor is not valid UTF-8")]
    Utf8,
}

/// A declared parent reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParent {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub relative_path: Option<String>,
}

/// One `<dependency>` entry, verbatim (no interpolation, no inheritance).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDependency {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub scope: Option<String>,
    pub optional: Option<String>,
}

/// The raw, uninterpreted content of one descriptor file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawModel {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub packaging: Option<String>,
    pub parent: Option<RawParent>,
    pub dependencies: Vec<RawDependency>,
    pub managed_dependencies: Vec<RawDependency>,
    pub properties: BTreeMap<String, String>,
}

/// Parse a descriptor into a [`RawModel`].
pub fn parse_pom(content: &str) -> Result<RawModel, DescriptorError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut model = RawModel::default();
    let mut path: Vec<String> = Vec::new();
    let mut current_dep: Option<RawDependency> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|err| DescriptorError::Xml(err.to_string()))?;
        match event {
            Event::Start(start) => {
                let name = std::str::from_utf8(start.local_name().as_ref())
                    .map_err(|_| DescriptorError::Utf8)?
                    .to_string();
                path.push(name);

                let p: Vec<&str> = path.iter().map(String::as_str).collect();
                match p.as_slice() {
                    ["project", "parent"] => {
                        model.parent.get_or_insert_with(RawParent::default);
                    }
                    ["project", "dependencies", "dependency"]
                    | ["project", "dependencyManagement", "dependencies", "dependency"] => {
                        current_dep = Some(RawDependency::default());
                    }
                    _ => {}
                }
            }
            Event::End(_) => {
                let p: Vec<&str> = path.iter().map(String::as_str).collect();
                match p.as_slice() {
                    ["project", "dependencies", "dependency"] => {
                        if let Some(dep) = current_dep.take() {
                            model.dependencies.push(dep);
                        }
                    }
                    ["project", "dependencyManagement", "dependencies", "dependency"] => {
                        if let Some(dep) = current_dep.take() {
                            model.managed_dependencies.push(dep);
                        }
                    }
                    _ => {}
                }
                path.pop();
            }
            Event::Text(text) => {
                let value = text
                    .unescape()
                    .map_err(|err| DescriptorError::Xml(err.to_string()))?
                    .trim()
                    .to_string();
                if value.is_empty() {
                    continue;
                }
                record_text(&mut model, &mut current_dep, &path, value);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(model)
}

fn record_text(
    model: &mut RawModel,
    current_dep: &mut Option<RawDependency>,
    path: &[String],
    value: String,
) {
    let p: Vec<&str> = path.iter().map(String::as_str).collect();
    match p.as_slice() {
        ["project", "groupId"] => model.group_id = Some(value),
        ["project", "artifactId"] => model.artifact_id = Some(value),
        ["project", "version"] => model.version = Some(value),
        ["project", "packaging"] => model.packaging = Some(value),

        ["project", "parent", field] => {
            if let Some(parent) = model.parent.as_mut() {
                match *field {
                    "groupId" => parent.group_id = Some(value),
                    "artifactId" => parent.artifact_id = Some(value),
                    "version" => parent.version = Some(value),
                    "relativePath" => parent.relative_path = Some(value),
                    _ => {}
                }
            }
        }

        ["project", "dependencies", "dependency", field]
        | ["project", "dependencyManagement", "dependencies", "dependency", field] => {
            if let Some(dep) = current_dep.as_mut() {
                match *field {
                    "groupId" => dep.group_id = Some(value),
                    "artifactId" => dep.artifact_id = Some(value),
                    "version" => dep.version = Some(value),
                    "scope" => dep.scope = Some(value),
                    "optional" => dep.optional = Some(value),
                    _ => {}
                }
            }
        }

        ["project", "properties", key] => {
            model.properties.insert((*key).to_string(), value);
        }

        _ => {}
    }
}
