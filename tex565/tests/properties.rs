use base64::{engine::general_purpose::STANDARD, Engine as _};
use byteorder::{ByteOrder, LittleEndian};
use proptest::prelude::*;
use tex565::{
    convert,
    key::{reserve_zero, ColorPresence},
    pack::{decode_565, is_opaque, pack_argb, pack_rgb565},
    Argb, ConvertOptions, DecodedImage, Dialect, Storage,
};

fn images() -> impl Strategy<Value = DecodedImage> {
    (1u32..12, 1u32..12)
        .prop_flat_map(|(w, h)| {
            (
                Just(w),
                Just(h),
                proptest::collection::vec(any::<Argb>(), (w * h) as usize),
            )
        })
        .prop_map(|(w, h, pixels)| {
            let has_alpha = pixels.iter().any(|&[a, ..]| a != 0xFF);
            DecodedImage::new(w, h, pixels, has_alpha).unwrap()
        })
}

fn dialects() -> impl Strategy<Value = Dialect> {
    proptest::sample::select(Dialect::ALL.to_vec())
}

fn options(dialect: Dialect) -> ConvertOptions {
    ConvertOptions {
        dialect,
        name: "p".to_string(),
        source_name: "p.png".to_string(),
        storage: Storage::NonStatic,
    }
}

proptest! {
    #[test]
    fn packing_keeps_high_bits(r: u8, g: u8, b: u8) {
        prop_assert_eq!(decode_565(pack_rgb565([r, g, b])), [r >> 3, g >> 2, b >> 3]);
    }

    #[test]
    fn every_pixel_is_own_color_or_key(image in images(), dialect in dialects()) {
        let conversion = convert(&image, &options(dialect)).unwrap();
        let key = conversion.transparency.key;

        let mut expected_source = image.pixels().to_vec();
        if dialect.reserves_zero() {
            reserve_zero(&mut expected_source);
        }

        prop_assert_eq!(conversion.packed.len(), expected_source.len());
        for (&packed, &pixel) in conversion.packed.iter().zip(&expected_source) {
            if is_opaque(pixel) {
                prop_assert_eq!(packed, pack_argb(pixel));
                if dialect.reserves_zero() {
                    prop_assert_ne!(packed, 0x0000);
                }
            } else {
                prop_assert_eq!(packed, key);
            }
        }

        if image.has_alpha() || dialect.reserves_zero() {
            let presence = ColorPresence::from_opaque_pixels(&expected_source);
            prop_assert!(!presence.contains(key));
        }
        if dialect.reserves_zero() {
            prop_assert_eq!(key, 0x0000);
        }
    }

    #[test]
    fn script_blob_decodes_to_packed_pixels(image in images()) {
        let conversion = convert(&image, &options(Dialect::Script)).unwrap();

        let blob = conversion.lines[2]
            .strip_prefix("p.setData(\"")
            .and_then(|l| l.strip_suffix("\");"))
            .unwrap();
        let bytes = STANDARD.decode(blob).unwrap();
        prop_assert_eq!(bytes.len(), conversion.packed.len() * 2);

        let mut pixels = vec![0; conversion.packed.len()];
        LittleEndian::read_u16_into(&bytes, &mut pixels);
        prop_assert_eq!(pixels, conversion.packed);
    }
}
