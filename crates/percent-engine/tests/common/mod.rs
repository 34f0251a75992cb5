// Test adapter shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;

use percent_engine::percent_core::{Axis, FixedSizeHandler, UnitSizeHandler};
use percent_engine::LayoutAdapter;

pub const FONT_SIZE: f64 = 20.0;
pub const SCREEN_RES: u32 = 96;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestSizes {
    pub preferred: (i32, i32),
    pub minimum: (i32, i32),
}

/// Components are plain names; their sizes live in the adapter.
#[derive(Debug, Clone)]
pub struct TestAdapter {
    sizes: HashMap<&'static str, TestSizes>,
    handler: FixedSizeHandler,
}

impl TestAdapter {
    pub fn new() -> Self {
        Self {
            sizes: HashMap::new(),
            handler: FixedSizeHandler::new(FONT_SIZE, SCREEN_RES),
        }
    }

    pub fn component(&mut self, name: &'static str, preferred: (i32, i32), minimum: (i32, i32)) -> &'static str {
        self.sizes.insert(name, TestSizes { preferred, minimum });
        name
    }

    /// A component whose minimum size is half of its preferred size.
    pub fn sized(&mut self, name: &'static str, width: i32, height: i32) -> &'static str {
        self.component(name, (width, height), (width / 2, height / 2))
    }

    pub fn resize(&mut self, name: &'static str, preferred: (i32, i32)) {
        if let Some(sizes) = self.sizes.get_mut(name) {
            sizes.preferred = preferred;
        }
    }
}

impl LayoutAdapter for TestAdapter {
    type Component = &'static str;

    fn minimum_size(&self, component: &&'static str, axis: Axis) -> i32 {
        self.sizes
            .get(component)
            .map(|s| axis.select(s.minimum.0, s.minimum.1))
            .unwrap_or(0)
    }

    fn preferred_size(&self, component: &&'static str, axis: Axis) -> i32 {
        self.sizes
            .get(component)
            .map(|s| axis.select(s.preferred.0, s.preferred.1))
            .unwrap_or(0)
    }

    fn size_handler(&self) -> &dyn UnitSizeHandler {
        &self.handler
    }
}
