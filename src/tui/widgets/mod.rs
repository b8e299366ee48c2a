pub mod component_graph;
