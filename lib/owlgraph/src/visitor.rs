use crate::graph::Graph;
use crate::node::{NodeId, NodeKind, PropertyKind, ResourceKind};

/// Per-kind callbacks over the nodes of a [`Graph`].
///
/// [`Graph::accept`] calls the method matching the kind of a node.
/// Every method falls back to a more general one, down to the required [`visit_node`](Self::visit_node),
/// so an implementation only overrides the kinds it cares about.
/// `C` is a context threaded through the calls, like the element being written to.
pub trait Visitor<C: ?Sized> {
    type Error;

    /// Called for plain nodes and, by default, for every other kind.
    fn visit_node(&mut self, graph: &Graph, node: NodeId, context: &mut C)
    -> Result<(), Self::Error>;

    fn visit_literal(
        &mut self,
        graph: &Graph,
        node: NodeId,
        context: &mut C,
    ) -> Result<(), Self::Error> {
        self.visit_node(graph, node, context)
    }

    fn visit_collection(
        &mut self,
        graph: &Graph,
        node: NodeId,
        context: &mut C,
    ) -> Result<(), Self::Error> {
        self.visit_node(graph, node, context)
    }

    /// Called by default for every typed resource.
    fn visit_resource(
        &mut self,
        graph: &Graph,
        node: NodeId,
        context: &mut C,
    ) -> Result<(), Self::Error> {
        self.visit_node(graph, node, context)
    }

    fn visit_class(
        &mut self,
        graph: &Graph,
        node: NodeId,
        context: &mut C,
    ) -> Result<(), Self::Error> {
        self.visit_resource(graph, node, context)
    }

    fn visit_restriction(
        &mut self,
        graph: &Graph,
        node: NodeId,
        context: &mut C,
    ) -> Result<(), Self::Error> {
        self.visit_resource(graph, node, context)
    }

    fn visit_data_range(
        &mut self,
        graph: &Graph,
        node: NodeId,
        context: &mut C,
    ) -> Result<(), Self::Error> {
        self.visit_resource(graph, node, context)
    }

    fn visit_datatype(
        &mut self,
        graph: &Graph,
        node: NodeId,
        context: &mut C,
    ) -> Result<(), Self::Error> {
        self.visit_resource(graph, node, context)
    }

    /// Called for generic properties and, by default, for every property flavour.
    fn visit_property(
        &mut self,
        graph: &Graph,
        node: NodeId,
        context: &mut C,
    ) -> Result<(), Self::Error> {
        self.visit_resource(graph, node, context)
    }

    fn visit_datatype_property(
        &mut self,
        graph: &Graph,
        node: NodeId,
        context: &mut C,
    ) -> Result<(), Self::Error> {
        self.visit_property(graph, node, context)
    }

    fn visit_object_property(
        &mut self,
        graph: &Graph,
        node: NodeId,
        context: &mut C,
    ) -> Result<(), Self::Error> {
        self.visit_property(graph, node, context)
    }

    fn visit_annotation_property(
        &mut self,
        graph: &Graph,
        node: NodeId,
        context: &mut C,
    ) -> Result<(), Self::Error> {
        self.visit_property(graph, node, context)
    }

    fn visit_ontology_property(
        &mut self,
        graph: &Graph,
        node: NodeId,
        context: &mut C,
    ) -> Result<(), Self::Error> {
        self.visit_property(graph, node, context)
    }

    fn visit_individual(
        &mut self,
        graph: &Graph,
        node: NodeId,
        context: &mut C,
    ) -> Result<(), Self::Error> {
        self.visit_resource(graph, node, context)
    }

    fn visit_ontology(
        &mut self,
        graph: &Graph,
        node: NodeId,
        context: &mut C,
    ) -> Result<(), Self::Error> {
        self.visit_resource(graph, node, context)
    }
}

pub(crate) fn dispatch<C: ?Sized, V: Visitor<C> + ?Sized>(
    graph: &Graph,
    node: NodeId,
    visitor: &mut V,
    context: &mut C,
) -> Result<(), V::Error> {
    match graph.node(node).kind() {
        NodeKind::Plain => visitor.visit_node(graph, node, context),
        NodeKind::Literal(_) => visitor.visit_literal(graph, node, context),
        NodeKind::Collection(_) => visitor.visit_collection(graph, node, context),
        NodeKind::Resource { kind, .. } => match kind {
            ResourceKind::Class => visitor.visit_class(graph, node, context),
            ResourceKind::Restriction => visitor.visit_restriction(graph, node, context),
            ResourceKind::DataRange => visitor.visit_data_range(graph, node, context),
            ResourceKind::Datatype => visitor.visit_datatype(graph, node, context),
            ResourceKind::Property(PropertyKind::Generic) => {
                visitor.visit_property(graph, node, context)
            }
            ResourceKind::Property(PropertyKind::Datatype) => {
                visitor.visit_datatype_property(graph, node, context)
            }
            ResourceKind::Property(PropertyKind::Object) => {
                visitor.visit_object_property(graph, node, context)
            }
            ResourceKind::Property(PropertyKind::Annotation) => {
                visitor.visit_annotation_property(graph, node, context)
            }
            ResourceKind::Property(PropertyKind::Ontology) => {
                visitor.visit_ontology_property(graph, node, context)
            }
            ResourceKind::Individual => visitor.visit_individual(graph, node, context),
            ResourceKind::Ontology => visitor.visit_ontology(graph, node, context),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::owl;
    use std::convert::Infallible;

    struct KindNames;

    impl Visitor<Vec<&'static str>> for KindNames {
        type Error = Infallible;

        fn visit_node(
            &mut self,
            _: &Graph,
            _: NodeId,
            names: &mut Vec<&'static str>,
        ) -> Result<(), Infallible> {
            names.push("node");
            Ok(())
        }

        fn visit_property(
            &mut self,
            _: &Graph,
            _: NodeId,
            names: &mut Vec<&'static str>,
        ) -> Result<(), Infallible> {
            names.push("property");
            Ok(())
        }

        fn visit_class(
            &mut self,
            _: &Graph,
            _: NodeId,
            names: &mut Vec<&'static str>,
        ) -> Result<(), Infallible> {
            names.push("class");
            Ok(())
        }
    }

    #[test]
    fn dispatch_falls_back_to_general_methods() -> Result<(), Infallible> {
        let mut graph = Graph::new();
        let class =
            graph.resolve_resource(Some("http://example.com/C"), ResourceKind::Class, owl::CLASS);
        let property = graph.resolve_resource(
            Some("http://example.com/p"),
            ResourceKind::Property(PropertyKind::Object),
            owl::OBJECT_PROPERTY,
        );
        let literal = graph.add_literal("v", None, None);
        let individual = graph.resolve_resource(
            Some("http://example.com/i"),
            ResourceKind::Individual,
            "http://example.com/C",
        );

        let mut names = Vec::new();
        for node in [class, property, literal, individual] {
            graph.accept(node, &mut KindNames, &mut names)?;
        }
        assert_eq!(names, ["class", "property", "node", "node"]);
        Ok(())
    }
}
