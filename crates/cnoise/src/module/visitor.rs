use crate::error::NoiseError;
use crate::module::{Module, Source};

/// Depth-first walk over a module graph. Shared children are visited once
/// per parent that references them.
pub trait Visitor {
    fn visit_module(&mut self, module: &Module) {
        self.walk_sources(module)
    }

    fn walk_sources(&mut self, module: &Module) {
        for (slot, source) in module.sources() {
            self.visit_source(module, slot, source);
        }
    }

    fn visit_source(&mut self, parent: &Module, slot: &'static str, source: &Source) {
        match source.get() {
            Some(child) => self.visit_module(child),
            None => self.visit_missing_source(parent, slot),
        }
    }

    fn visit_missing_source(&mut self, _parent: &Module, _slot: &'static str) {}
}

#[derive(Default)]
pub(crate) struct SourceValidator {
    pub(crate) visited: usize,
    pub(crate) error: Option<NoiseError>,
}

impl Visitor for SourceValidator {
    fn visit_module(&mut self, module: &Module) {
        if self.error.is_some() {
            return;
        }
        self.visited += 1;
        self.walk_sources(module)
    }

    fn visit_missing_source(&mut self, parent: &Module, slot: &'static str) {
        if self.error.is_none() {
            self.error = Some(NoiseError::MissingSource {
                module: parent.name(),
                slot,
            });
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::module::visitor::Visitor;
    use crate::module::{Module, Perlin, Voronoi};

    #[derive(Default)]
    struct NameCollector(Vec<&'static str>);

    impl Visitor for NameCollector {
        fn visit_module(&mut self, module: &Module) {
            self.0.push(module.name());
            self.walk_sources(module)
        }
    }

    #[test]
    fn visits_depth_first() {
        let shared = Arc::new(Module::from(Voronoi::new()));
        let graph = Module::select(
            Module::abs(&shared),
            Perlin::new(),
            Module::invert(&shared),
            -0.5,
            0.5,
            0.0,
        )
        .unwrap();
        let mut collector = NameCollector::default();
        collector.visit_module(&graph);
        assert_eq!(
            collector.0,
            vec!["select", "abs", "voronoi", "perlin", "invert", "voronoi"]
        );
    }
}
