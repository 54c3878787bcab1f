use super::*;

fn frame(data: Vec<u8>) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data,
        premultiplied: true,
    }
}

#[test]
fn fingerprint_tracks_pixels() {
    let a = frame(vec![0, 0, 0, 255, 1, 2, 3, 255]);
    let b = frame(vec![0, 0, 0, 255, 1, 2, 4, 255]);
    assert_eq!(a.fingerprint(), a.clone().fingerprint());
    assert_ne!(a.fingerprint(), b.fingerprint());
}

#[test]
fn pixel_lookup_is_bounds_checked() {
    let f = frame(vec![0, 0, 0, 255, 1, 2, 3, 255]);
    assert_eq!(f.pixel(1, 0), Some([1, 2, 3, 255]));
    assert_eq!(f.pixel(2, 0), None);
    assert_eq!(f.pixel(0, 1), None);
}

#[test]
fn unpremultiply_for_export() {
    let f = frame(vec![64, 0, 0, 128, 9, 9, 9, 0]);
    let straight = f.to_straight_rgba8();
    assert_eq!(&straight[..4], &[128, 0, 0, 128]);
    assert_eq!(&straight[4..], &[9, 9, 9, 0]);
}
