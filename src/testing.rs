use crate::grid_map::{assert_map_is_well_formed, GridMap};

pub fn init_test() {
    drop(env_logger::try_init());
}

pub type TestMap = GridMap<&'static str, &'static str, i32>;

pub struct MapBuilder {
    entries: Vec<(&'static str, &'static str, i32)>,
}
impl MapBuilder {
    pub fn entry(&mut self, row: &'static str, col: &'static str, value: i32) -> &mut Self {
        self.entries.push((row, col, value));
        self
    }
    pub fn build(self) -> TestMap {
        let mut map = GridMap::new();
        for (row, col, value) in self.entries {
            map.insert(row, col, value);
        }
        assert_map_is_well_formed(&map);
        map
    }
}

pub fn map_builder() -> MapBuilder {
    MapBuilder {
        entries: Vec::new(),
    }
}

pub fn map_from_triples(triples: &[(&'static str, &'static str, i32)]) -> TestMap {
    let mut b = map_builder();
    for &(row, col, value) in triples.iter() {
        b.entry(row, col, value);
    }
    b.build()
}
