use text_flow::resources::load_font;

#[tokio::test]
async fn bundled_font_loads() {
    let font = load_font("fonts/flow_block.typeface.json").await.unwrap();
    assert_eq!(font.family_name(), "Flow Block");
    assert!(font.glyph('G').is_some());
}

#[tokio::test]
async fn missing_font_is_an_error() {
    let result = load_font("fonts/missing.typeface.json").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn non_font_file_is_an_error() {
    let result = load_font("textures/matcaps/3.png").await;
    assert!(result.is_err());
}
