use super::*;

#[test]
fn default_layout_is_reference_times_two() {
    let l = NametagLayout::default();
    assert_eq!(l.pixel_size(), (718, 922));
    assert_eq!(l.code.panel, Rect::new(62.0, 308.0, 194.0, 440.0));
    assert_eq!(l.code.image, Rect::new(72.0, 318.0, 185.0, 431.0));
    assert_eq!(l.sponsor.panel, Rect::new(230.0, 308.0, 682.0, 440.0));
    assert_eq!(l.sponsor.image, Rect::new(254.0, 330.0, 658.0, 418.0));
    assert_eq!(l.name_panel, Rect::new(48.0, 558.0, 670.0, 966.0));
    assert_eq!(l.rule_x, (96.0, 622.0));
    assert_eq!(l.name.rule_y, 736.0);
    assert_eq!(l.organization.rule_y, 852.0);
    assert_eq!(l.title.size, 60.0);
    assert_eq!(l.name.size, 56.0);
    assert_eq!(l.organization.size, 32.0);
    assert_eq!(l.icon_size, 28.0);
    assert_eq!(l.icon_gap, 8.0);
    assert_eq!(l.radius, 20.0);
}

#[test]
fn scaling_keeps_colors() {
    let reference = NametagLayout::reference();
    let scaled = reference.scaled(3.0).unwrap();
    assert_eq!(scaled.background, reference.background);
    assert_eq!(scaled.byline.color, reference.byline.color);
    assert_eq!(scaled.title.top, 120.0);
}

#[test]
fn invalid_scale_is_rejected() {
    let reference = NametagLayout::reference();
    assert!(reference.scaled(0.0).is_err());
    assert!(reference.scaled(-1.0).is_err());
    assert!(reference.scaled(f64::INFINITY).is_err());
}

#[test]
fn branding_json_overrides_only_given_fields() {
    let b: EventBranding = serde_json::from_str(r#"{"title":"RustConf"}"#).unwrap();
    assert_eq!(b.title, "RustConf");
    assert_eq!(b.subtitle, EventBranding::default().subtitle);
}

#[test]
fn branding_json_rejects_unknown_fields() {
    assert!(serde_json::from_str::<EventBranding>(r#"{"tittle":"typo"}"#).is_err());
}

#[test]
fn branding_from_missing_path_fails() {
    assert!(EventBranding::from_path(Path::new("target/none/branding.json")).is_err());
}
