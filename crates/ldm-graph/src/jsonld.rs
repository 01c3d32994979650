//! Expanded JSON-LD codec
//!
//! Reads and writes the expanded JSON-LD form exchanged with the metadata
//! backend: an array of node objects whose properties hold arrays of
//! `{"@id"}`, `{"@value", "@type"?, "@language"?}` or `{"@list": [...]}`.
//! A top-level `{"@graph": [...]}` wrapper and single node objects are also
//! accepted. Nodes without `@id` get a fresh blank node label.

use crate::error::{GraphError, Result};
use crate::iri::Iri;
use crate::literal::{Literal, Value};
use crate::statement::{Graph, Statement};
use crate::vocab::{rdf, xsd};
use indexmap::IndexMap;
use serde_json::{json, Map, Value as Json};

/// Decode an expanded JSON-LD document from text
///
/// # Errors
///
/// Returns [`GraphError`] on malformed JSON or unsupported structures.
pub fn parse_str(text: &str) -> Result<Graph> {
    let json: Json = serde_json::from_str(text)?;
    from_json(&json)
}

/// Decode an expanded JSON-LD document
///
/// # Errors
///
/// Returns [`GraphError`] when the document is not an array of node objects
/// or a value has an unsupported form.
pub fn from_json(document: &Json) -> Result<Graph> {
    let mut reader = Reader::default();
    match document {
        Json::Array(nodes) => {
            for node in nodes {
                reader.node(node)?;
            }
        }
        Json::Object(map) => match map.get("@graph") {
            Some(Json::Array(nodes)) => {
                for node in nodes {
                    reader.node(node)?;
                }
            }
            Some(_) => {
                return Err(GraphError::InvalidKeyword {
                    keyword: "@graph",
                    expected: "array",
                })
            }
            None => {
                reader.node(document)?;
            }
        },
        _ => {
            return Err(GraphError::InvalidDocument(
                "expected an array of node objects".to_string(),
            ))
        }
    }
    tracing::debug!(statements = reader.graph.len(), "decoded json-ld document");
    Ok(reader.graph)
}

#[derive(Default)]
struct Reader {
    graph: Graph,
    blank_nodes: usize,
}

impl Reader {
    /// Read a node object, returning its identifier
    fn node(&mut self, node: &Json) -> Result<Iri> {
        let Json::Object(map) = node else {
            return Err(GraphError::InvalidDocument(format!(
                "expected node object, found {node}"
            )));
        };

        let subject = match map.get("@id") {
            Some(Json::String(id)) => Iri::new(id.as_str()),
            Some(_) => {
                return Err(GraphError::InvalidKeyword {
                    keyword: "@id",
                    expected: "string",
                })
            }
            None => self.blank_node(),
        };

        for (key, value) in map {
            match key.as_str() {
                "@id" => {}
                "@type" => {
                    for ty in as_array(value) {
                        let Json::String(ty) = ty else {
                            return Err(GraphError::InvalidKeyword {
                                keyword: "@type",
                                expected: "string or array of strings",
                            });
                        };
                        self.graph.insert(Statement::new(
                            subject.clone(),
                            rdf::TYPE,
                            Iri::new(ty.as_str()),
                        ));
                    }
                }
                k if k.starts_with('@') => {
                    tracing::debug!(keyword = k, "ignoring json-ld keyword");
                }
                predicate => {
                    for item in as_array(value) {
                        let object = self.value(predicate, item)?;
                        self.graph
                            .insert(Statement::new(subject.clone(), predicate, object));
                    }
                }
            }
        }
        Ok(subject)
    }

    fn value(&mut self, predicate: &str, item: &Json) -> Result<Value> {
        match item {
            Json::String(s) => Ok(Value::literal(s.as_str())),
            Json::Bool(b) => Ok(Value::Literal(Literal::typed(b.to_string(), xsd::BOOLEAN))),
            Json::Number(n) => {
                let datatype = if n.is_f64() { xsd::DOUBLE } else { xsd::INTEGER };
                Ok(Value::Literal(Literal::typed(n.to_string(), datatype)))
            }
            Json::Object(map) => {
                if let Some(list) = map.get("@list") {
                    let items = as_array(list)
                        .map(|i| self.value(predicate, i))
                        .collect::<Result<Vec<_>>>()?;
                    return Ok(Value::List(items));
                }
                if let Some(raw) = map.get("@value") {
                    return literal(predicate, raw, map);
                }
                let id = self.node(item)?;
                Ok(Value::Reference(id))
            }
            Json::Null | Json::Array(_) => Err(GraphError::UnsupportedValue {
                predicate: predicate.to_string(),
                found: item.to_string(),
            }),
        }
    }

    fn blank_node(&mut self) -> Iri {
        self.blank_nodes += 1;
        Iri::new(format!("_:b{}", self.blank_nodes))
    }
}

fn literal(predicate: &str, raw: &Json, map: &Map<String, Json>) -> Result<Value> {
    let lexical = match raw {
        Json::String(s) => s.clone(),
        Json::Bool(_) | Json::Number(_) => raw.to_string(),
        _ => {
            return Err(GraphError::UnsupportedValue {
                predicate: predicate.to_string(),
                found: raw.to_string(),
            })
        }
    };
    let mut literal = Literal::plain(lexical);
    match map.get("@type") {
        Some(Json::String(dt)) => literal.datatype = Some(Iri::new(dt.as_str())),
        Some(_) => {
            return Err(GraphError::InvalidKeyword {
                keyword: "@type",
                expected: "string",
            })
        }
        None => match raw {
            Json::Bool(_) => literal.datatype = Some(Iri::new(xsd::BOOLEAN)),
            Json::Number(n) if n.is_f64() => literal.datatype = Some(Iri::new(xsd::DOUBLE)),
            Json::Number(_) => literal.datatype = Some(Iri::new(xsd::INTEGER)),
            _ => {}
        },
    }
    if let Some(Json::String(language)) = map.get("@language") {
        literal.language = Some(language.clone());
    }
    Ok(Value::Literal(literal))
}

fn as_array(value: &Json) -> impl Iterator<Item = &Json> {
    match value {
        Json::Array(items) => items.iter().collect::<Vec<_>>().into_iter(),
        other => vec![other].into_iter(),
    }
}

/// Encode a graph as expanded JSON-LD
///
/// Node objects appear in first-seen subject order; `rdf:type` references are
/// written as `@type`.
#[must_use]
pub fn to_json(graph: &Graph) -> Json {
    let mut nodes: IndexMap<&Iri, Map<String, Json>> = IndexMap::new();
    for statement in graph {
        let node = nodes.entry(&statement.subject).or_insert_with(|| {
            let mut map = Map::new();
            map.insert("@id".to_string(), json!(statement.subject.as_str()));
            map
        });
        if statement.predicate == rdf::TYPE {
            if let Value::Reference(ty) = &statement.object {
                push(node, "@type", json!(ty.as_str()));
                continue;
            }
        }
        push(node, statement.predicate.as_str(), value_to_json(&statement.object));
    }
    Json::Array(nodes.into_values().map(Json::Object).collect())
}

fn push(node: &mut Map<String, Json>, key: &str, value: Json) {
    let slot = node
        .entry(key.to_string())
        .or_insert_with(|| Json::Array(Vec::new()));
    if let Json::Array(items) = slot {
        items.push(value);
    }
}

fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Reference(iri) => json!({ "@id": iri.as_str() }),
        Value::Literal(literal) => {
            let mut map = Map::new();
            map.insert("@value".to_string(), json!(literal.lexical));
            if let Some(language) = &literal.language {
                map.insert("@language".to_string(), json!(language));
            } else if let Some(datatype) = &literal.datatype {
                map.insert("@type".to_string(), json!(datatype.as_str()));
            }
            Json::Object(map)
        }
        Value::List(items) => json!({ "@list": items.iter().map(value_to_json).collect::<Vec<_>>() }),
    }
}
