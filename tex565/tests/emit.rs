use tex565::{
    emit::{emit, Dialect, EmitParams, Storage, Transparency},
    ConvertError,
};

const RED_GREEN: [u16; 2] = [0xf800, 0x07e0];

fn params(pixels: &[u16], width: u32, height: u32) -> EmitParams<'_> {
    EmitParams {
        source_name: "t.png",
        name: "t",
        storage: Storage::Static,
        width,
        height,
        transparency: Transparency::default(),
        pixels,
    }
}

#[test]
fn plain_array_layout() {
    let lines = emit(Dialect::Plain, &params(&RED_GREEN, 2, 1));

    assert_eq!(
        lines,
        [
            "// Generated from t.png",
            "static const uint16_t t_data[] = {",
            "0xf800, 0x07e0,",
            "};",
            "static const TEXTURE t = {",
            "    .width = 2,",
            "    .height = 1,",
            "    .bitmap = t_data,",
            "};",
        ]
    );
}

#[test]
fn texture_records_carry_transparency() {
    let pixels = [0x0000, 0x0001, 0xffff, 0x0000];
    let mut p = params(&pixels, 2, 2);
    p.transparency = Transparency {
        enabled: true,
        key: 0,
    };

    for (dialect, record_type) in [(Dialect::Texture, "Texture"), (Dialect::Texture2d, "Texture2D")]
    {
        let lines = emit(dialect, &p);
        assert_eq!(
            lines,
            [
                "// Generated from t.png".to_string(),
                "static const uint16_t t_data[] = {".to_string(),
                "0x0000, 0x0001,".to_string(),
                "0xffff, 0x0000,".to_string(),
                "};".to_string(),
                format!("static const {record_type} t = {{"),
                "    .width = 2,".to_string(),
                "    .height = 2,".to_string(),
                "    .hasTransparency = true,".to_string(),
                "    .transparentColor = 0x0000,".to_string(),
                "    .data = t_data,".to_string(),
                "};".to_string(),
            ]
        );
    }
}

#[test]
fn sprite_embeds_header_in_array() {
    let mut p = params(&RED_GREEN, 1, 2);
    p.transparency = Transparency {
        enabled: true,
        key: 0x0021,
    };

    assert_eq!(
        emit(Dialect::Sprite, &p),
        [
            "// Generated from t.png",
            "static const uint16_t t[] = {",
            "1, 2, 0x0021,",
            "0xf800,",
            "0x07e0,",
            "};",
        ]
    );
}

#[test]
fn script_uses_base64_little_endian() {
    let lines = emit(Dialect::Script, &params(&RED_GREEN, 2, 1));
    assert_eq!(
        lines,
        [
            "// Generated from t.png",
            "var t = new Texture(2, 1, null);",
            "t.setData(\"APjgBw==\");",
        ]
    );

    let mut p = params(&RED_GREEN, 2, 1);
    p.transparency = Transparency {
        enabled: true,
        key: 0x1234,
    };
    assert_eq!(
        emit(Dialect::Script, &p)[1],
        "var t = new Texture(2, 1, 0x1234);"
    );
}

#[test]
fn non_static_storage_applies_to_every_declaration() {
    let mut p = params(&RED_GREEN, 2, 1);
    p.storage = Storage::NonStatic;

    for dialect in Dialect::ALL {
        let lines = emit(dialect, &p);
        assert!(
            lines.iter().all(|l| !l.contains("static")),
            "{dialect}: {lines:?}"
        );
    }

    let lines = emit(Dialect::Texture2d, &p);
    assert_eq!(lines[1], "const uint16_t t_data[] = {");
    assert_eq!(lines[4], "const Texture2D t = {");
}

#[test]
fn dialect_names() {
    for dialect in Dialect::ALL {
        assert_eq!(dialect.name().parse::<Dialect>().unwrap(), dialect);
    }
    assert_eq!("TEXTURE2D".parse::<Dialect>().unwrap(), Dialect::Texture2d);

    let err = "qoi".parse::<Dialect>().unwrap_err();
    assert!(matches!(err, ConvertError::UnknownDialect { ref name } if name == "qoi"));
    assert!(Dialect::Texture.reserves_zero());
    assert!(!Dialect::Texture2d.reserves_zero());
}
