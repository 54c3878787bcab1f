use super::*;
use crate::assets::decode::parse_svg;

const WIDE: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100">
<rect x="0" y="0" width="200" height="100" fill="#ff0000"/>
</svg>"##;

#[test]
fn raster_size_keeps_aspect() {
    let tree = parse_svg(WIDE).unwrap();
    assert_eq!(svg_raster_size(&tree, 512).unwrap(), (512, 256));
}

#[test]
fn rasterizes_opaque_fill() {
    let tree = parse_svg(WIDE).unwrap();
    let px = rasterize_svg_to_premul_rgba8(&tree, 20, 10).unwrap();
    assert_eq!(px.len(), 20 * 10 * 4);
    let mid = (5 * 20 + 10) * 4;
    assert_eq!(&px[mid..mid + 4], &[255, 0, 0, 255]);
}
