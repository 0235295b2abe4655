use fluid_sizing::{generate, generate_css_for_content, FluidSizingConfig, FluidError, GenerateArgs};
use std::fs;
use tempfile::tempdir;

const CONFIG_YAML: &str = r#"
screens:
  sm: 640px
  md: 768px
  lg: 1024px
  xl: 1280px
  2xl: 1536px
  DEFAULT_FROM: 768px
  DEFAULT_TO: 1280px
values:
  margin:
    array: ["md 32px", "xl 64px"]
    string: "md 32px, xl 64px"
"#;

fn args_for(dir: &std::path::Path, config: Option<std::path::PathBuf>) -> GenerateArgs {
    GenerateArgs {
        input: vec![format!("{}/*.html", dir.display())],
        output_css: dir.join("dist").join("fluid.css"),
        config,
        minify: false,
        verbose: false,
        jobs: None,
        exclude: vec![],
        dry_run: false,
    }
}

#[test]
fn test_end_to_end_css_generation() {
    let temp_dir = tempdir().unwrap();

    fs::write(
        temp_dir.path().join("index.html"),
        r#"
        <div class="fluid-mt-[32px,64px]"></div>
        <div class="fluid-space-y-[32px,64px]"></div>
        <div class="fluid-mt-[2rem,4rem]"></div>
        <div class="fluid-mt-[768px_32px,1280px_64px]"></div>
        <div class="fluid-mt-[lg_32px,2xl_64px]"></div>
        "#,
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("named.html"),
        r#"<div class="fluid-mt-array"></div><div class="fluid-mt-string"></div>"#,
    )
    .unwrap();

    let config_path = temp_dir.path().join("fluid.yaml");
    fs::write(&config_path, CONFIG_YAML).unwrap();

    let args = args_for(temp_dir.path(), Some(config_path));
    let output_css = args.output_css.clone();

    let result = generate(args).unwrap();

    assert_eq!(result.total_files_processed, 2);
    assert_eq!(result.total_candidates, 7);
    assert_eq!(result.total_classes, 7);

    let written = fs::read_to_string(&output_css).unwrap();
    assert_eq!(written, result.css_content);

    assert!(written.contains(
        ".fluid-mt-\\[lg_32px\\2c 2xl_64px\\] {\n    margin-top: clamp(32px, 6.25vw - 32px, 64px)\n}"
    ));
    assert!(written
        .contains(".fluid-mt-array {\n    margin-top: clamp(32px, 6.25vw - 16px, 64px)\n}"));
    assert!(written
        .contains(".fluid-mt-string {\n    margin-top: clamp(32px, 6.25vw - 16px, 64px)\n}"));
    assert!(written.contains(
        "margin-top: calc(clamp(32px, 6.25vw - 16px, 64px) * calc(1 - var(--tw-space-y-reverse)))"
    ));
}

#[test]
fn test_invalid_values_are_skipped() {
    let temp_dir = tempdir().unwrap();
    fs::write(
        temp_dir.path().join("index.html"),
        r#"<div class="fluid-mt-[64px,96px,128px] fluid-mt-[768px_32px,1280px_4rem] fluid-p-[768px_1px,1280px_2px]"></div>"#,
    )
    .unwrap();

    let result = generate(args_for(temp_dir.path(), None)).unwrap();

    assert_eq!(result.total_candidates, 3);
    assert_eq!(result.total_classes, 1);
    assert!(result.css_content.contains("padding: clamp(1px, 0.19531vw - 0.5px, 2px)"));
}

#[test]
fn test_dry_run_does_not_write() {
    let temp_dir = tempdir().unwrap();
    fs::write(
        temp_dir.path().join("a.html"),
        r#"<p class="fluid-w-[768px_10rem,1280px_20rem]">"#,
    )
    .unwrap();

    let mut args = args_for(temp_dir.path(), None);
    args.dry_run = true;
    let output_css = args.output_css.clone();

    let result = generate(args).unwrap();
    assert_eq!(result.total_classes, 1);
    assert!(!output_css.exists());
}

#[test]
fn test_no_files_found() {
    let temp_dir = tempdir().unwrap();

    let err = generate(args_for(temp_dir.path(), None)).unwrap_err();
    assert!(matches!(err, FluidError::NoFilesFound));
    assert!(err.to_string().contains("No files found"));
}

#[test]
fn test_minified_css_for_content() {
    let css = generate_css_for_content(
        r#"<div class="fluid-text-[768px_1rem,1280px_1.5rem]"></div>"#,
        FluidSizingConfig::default(),
        true,
    );

    insta::assert_snapshot!(
        css,
        @r"
    .fluid-text-\[768px_1rem\2c 1280px_1\.5rem\]{font-size:clamp(1rem, 1.5625vw + 0.25rem, 1.5rem)}
    "
    );
}

#[test]
fn test_binary_files_are_skipped() {
    let temp_dir = tempdir().unwrap();
    fs::write(
        temp_dir.path().join("a.html"),
        r#"<p class="fluid-mt-[768px_32px,1280px_64px]">"#,
    )
    .unwrap();
    fs::write(temp_dir.path().join("logo.png"), [0xff, 0xfe, 0x00, 0x80]).unwrap();

    let mut args = args_for(temp_dir.path(), None);
    args.input = vec![format!("{}/*", temp_dir.path().display())];

    let result = generate(args).unwrap();

    assert_eq!(result.total_files_processed, 2);
    assert_eq!(result.total_classes, 1);
    assert!(result.css_content.contains("margin-top: clamp(32px, 6.25vw - 16px, 64px)"));
}
