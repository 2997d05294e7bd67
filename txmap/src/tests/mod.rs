use std::path::PathBuf;

use crate::shape::Shape;

pub fn assets_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
}

pub fn fixture(name: &str) -> Vec<u8> {
    let path = assets_dir().join(name).with_extension("geojson");
    std::fs::read(&path).unwrap_or_else(|err| panic!("cannot read {}: {err}", path.display()))
}

pub fn shape(name: &str) -> Shape {
    Shape::from_geojson(name, &fixture(name)).unwrap()
}
