//! Turtle serialization for graph stores, backed by oxigraph's RDF I/O.
//!
//! Identifiers map to IRIs under `http://example.org/{namespace}/{local}`;
//! text literals stay plain, number literals are typed `xsd:double` with
//! their lexical form preserved. `load(serialize(S))` yields the same triple
//! set as `S`.

use oxigraph::io::{RdfFormat, RdfParser, RdfSerializer};
use oxigraph::model as rdf;
use oxigraph::model::vocab::xsd;

use crate::error::CodecError;
use crate::ident::{Identifier, Namespace};

use super::store::GraphStore;
use super::{Literal, LiteralKind, Term, Triple};

/// IRI base for all sema-tawy identifiers.
const GRAPH_BASE: &str = "http://example.org/";

/// Render an identifier as an IRI string.
fn identifier_to_iri(id: &Identifier) -> String {
    format!("{GRAPH_BASE}{}/{}", id.namespace(), id.local())
}

/// Parse an IRI back into an identifier.
///
/// Fails when the IRI is outside the engine's namespace scheme, since such a
/// term could not have been produced by [`GraphStore::to_turtle`].
fn iri_to_identifier(iri: &str) -> Result<Identifier, CodecError> {
    let rest = iri
        .strip_prefix(GRAPH_BASE)
        .ok_or_else(|| CodecError::MalformedSerialization {
            message: format!("IRI <{iri}> is outside the {GRAPH_BASE} identifier scheme"),
        })?;
    let (prefix, local) = rest
        .split_once('/')
        .ok_or_else(|| CodecError::MalformedSerialization {
            message: format!("IRI <{iri}> has no namespace segment"),
        })?;
    let namespace = Namespace::new(prefix).map_err(|_| CodecError::MalformedSerialization {
        message: format!("IRI <{iri}> has an invalid namespace prefix {prefix:?}"),
    })?;
    Identifier::from_parts(&namespace, local).map_err(|_| CodecError::MalformedSerialization {
        message: format!("IRI <{iri}> has a non-canonical local name {local:?}"),
    })
}

fn named_node(id: &Identifier) -> Result<rdf::NamedNode, CodecError> {
    rdf::NamedNode::new(identifier_to_iri(id)).map_err(|e| CodecError::Serialize {
        message: format!("identifier {id} renders an invalid IRI: {e}"),
    })
}

fn object_term(term: &Term) -> Result<rdf::Term, CodecError> {
    Ok(match term {
        Term::Id(id) => rdf::Term::NamedNode(named_node(id)?),
        Term::Lit(lit) => rdf::Term::Literal(match lit.kind() {
            LiteralKind::Text => rdf::Literal::new_simple_literal(lit.lexical()),
            LiteralKind::Number => rdf::Literal::new_typed_literal(lit.lexical(), xsd::DOUBLE),
        }),
    })
}

fn literal_term(lit: &rdf::Literal) -> Literal {
    if lit.datatype() == xsd::DOUBLE {
        Literal::number(lit.value())
    } else {
        Literal::text(lit.value())
    }
}

impl GraphStore {
    /// Serialize the store's triple set as Turtle text.
    pub fn to_turtle(&self) -> Result<String, CodecError> {
        let mut serializer =
            RdfSerializer::from_format(RdfFormat::Turtle).for_writer(Vec::new());
        for triple in self.triples() {
            let quad = rdf::Quad::new(
                named_node(&triple.subject)?,
                named_node(&triple.predicate)?,
                object_term(&triple.object)?,
                rdf::GraphNameRef::DefaultGraph,
            );
            serializer
                .serialize_quad(&quad)
                .map_err(|e| CodecError::Serialize {
                    message: e.to_string(),
                })?;
        }
        let bytes = serializer.finish().map_err(|e| CodecError::Serialize {
            message: e.to_string(),
        })?;
        String::from_utf8(bytes).map_err(|e| CodecError::Serialize {
            message: format!("serializer produced non-UTF-8 output: {e}"),
        })
    }

    /// Load a store from Turtle text previously produced by [`Self::to_turtle`].
    ///
    /// The triple set round-trips exactly; insertion order follows the
    /// serialized document, which is not guaranteed to match the source
    /// store's order.
    pub fn from_turtle(
        name: impl Into<String>,
        namespace: Namespace,
        text: &str,
    ) -> Result<GraphStore, CodecError> {
        let mut store = GraphStore::new(name, namespace);
        let parser = RdfParser::from_format(RdfFormat::Turtle);
        for quad in parser.for_reader(text.as_bytes()) {
            let quad = quad.map_err(|e| CodecError::MalformedSerialization {
                message: e.to_string(),
            })?;

            let subject = match &quad.subject {
                rdf::Subject::NamedNode(n) => iri_to_identifier(n.as_str())?,
                other => {
                    return Err(CodecError::MalformedSerialization {
                        message: format!("unsupported subject term: {other}"),
                    });
                }
            };
            let predicate = iri_to_identifier(quad.predicate.as_str())?;
            let object = match &quad.object {
                rdf::Term::NamedNode(n) => Term::Id(iri_to_identifier(n.as_str())?),
                rdf::Term::Literal(lit) => Term::Lit(literal_term(lit)),
                other => {
                    return Err(CodecError::MalformedSerialization {
                        message: format!("unsupported object term: {other}"),
                    });
                }
            };

            store.insert(Triple {
                subject,
                predicate,
                object,
            });
        }
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ident::canonicalize;
    use std::collections::HashSet;

    fn ns(prefix: &str) -> Namespace {
        Namespace::new(prefix).unwrap()
    }

    fn sample_store() -> GraphStore {
        let fda = ns("fda");
        let chem = ns("chem");
        let mut store = GraphStore::new("sample", fda.clone());
        let widget = canonicalize(&fda, "Widget A").unwrap();
        store.insert(Triple::new(
            widget.clone(),
            canonicalize(&fda, "recallingFirm").unwrap(),
            Literal::text("Acme"),
        ));
        store.insert(Triple::new(
            widget,
            canonicalize(&fda, "relatedTo").unwrap(),
            canonicalize(&chem, "CHEMBL25").unwrap(),
        ));
        store.insert(Triple::new(
            canonicalize(&chem, "CHEMBL25").unwrap(),
            canonicalize(&chem, "alogp").unwrap(),
            Literal::number("1.31"),
        ));
        store
    }

    #[test]
    fn iri_round_trip() {
        let id = canonicalize(&ns("sensor"), "reading_2025-01-01T00:00:00").unwrap();
        let iri = identifier_to_iri(&id);
        assert_eq!(
            iri,
            "http://example.org/sensor/reading_2025-01-01T00-00-00"
        );
        assert_eq!(iri_to_identifier(&iri).unwrap(), id);
    }

    #[test]
    fn foreign_iris_are_rejected() {
        assert!(iri_to_identifier("https://www.wikidata.org/entity/Q418").is_err());
        assert!(iri_to_identifier("http://example.org/no-local").is_err());
    }

    #[test]
    fn turtle_round_trip_preserves_the_triple_set() {
        let store = sample_store();
        let text = store.to_turtle().unwrap();
        let loaded = GraphStore::from_turtle("sample", ns("fda"), &text).unwrap();

        let before: HashSet<Triple> = store.triples().cloned().collect();
        let after: HashSet<Triple> = loaded.triples().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn number_literals_round_trip_typed() {
        let store = sample_store();
        let text = store.to_turtle().unwrap();
        let loaded = GraphStore::from_turtle("sample", ns("fda"), &text).unwrap();

        let alogp = loaded
            .triples()
            .find(|t| t.predicate.local() == "alogp")
            .unwrap();
        let lit = alogp.object.as_literal().unwrap();
        assert_eq!(lit.kind(), LiteralKind::Number);
        assert_eq!(lit.lexical(), "1.31");
    }

    #[test]
    fn empty_store_round_trips() {
        let store = GraphStore::new("empty", ns("fda"));
        let text = store.to_turtle().unwrap();
        let loaded = GraphStore::from_turtle("empty", ns("fda"), &text).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn malformed_turtle_is_rejected() {
        let err = GraphStore::from_turtle("bad", ns("fda"), "<http://example.org/fda/a> <http://example.org/fda/b>")
            .unwrap_err();
        assert!(matches!(err, CodecError::MalformedSerialization { .. }));
    }

    #[test]
    fn turtle_with_foreign_terms_is_rejected() {
        let text = "<https://elsewhere.test/x> <https://elsewhere.test/y> \"z\" .";
        let err = GraphStore::from_turtle("bad", ns("fda"), text).unwrap_err();
        assert!(matches!(err, CodecError::MalformedSerialization { .. }));
    }
}
