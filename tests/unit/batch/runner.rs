use std::sync::Arc;

use super::*;
use crate::{
    assets::catalog::AssetCatalog,
    assets::decode::PreparedImage,
    assets::store::FixedAssets,
    batch::prompt::AcceptAll,
    config::settings::GeneratorConfig,
    foundation::core::Category,
    test_support::system_font,
};

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "traitstack_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn filled(w: u32, h: u32, px: [u8; 4]) -> PreparedImage {
    PreparedImage {
        width: w,
        height: h,
        rgba8_premul: Arc::new(px.repeat((w * h) as usize)),
    }
}

fn context(out_dir: PathBuf) -> GeneratorContext {
    let mut catalog = AssetCatalog::new();
    for (i, category) in Category::ALL.into_iter().enumerate() {
        let shade = (i as u8 + 1) * 30;
        catalog.insert(
            category,
            (0..3).map(|_| filled(16, 16, [shade, shade, shade, 255])).collect(),
        );
    }
    GeneratorContext {
        config: GeneratorConfig {
            output_dir: out_dir,
            padding: 2,
            font_size: 6.0,
            ..GeneratorConfig::default()
        },
        fixed: FixedAssets {
            signature: filled(16, 16, [0, 0, 0, 0]),
            logo: filled(2, 2, [0, 0, 255, 255]),
            font: system_font(),
        },
        catalog,
    }
}

fn row(record: usize, design: &str, label: &str) -> TableRow {
    TableRow {
        record,
        design: design.to_string(),
        label: label.to_string(),
        include_signature: false,
    }
}

struct Scripted(Vec<Decision>);

impl Prompter for Scripted {
    fn decide(&mut self, _item: &ItemDescriptor, _out_path: &Path) -> StackResult<Decision> {
        Ok(self.0.remove(0))
    }
}

#[test]
fn generates_zero_padded_files() {
    let dir = temp_dir("runner_generate");
    let ctx = context(dir.clone());
    let runner = BatchRunner::new(&ctx);
    let rows = vec![row(1, "1,1,1,1,1,1,1", "1"), row(2, "2,2,2,2,2,2,2", "23")];

    let report = runner.run(&rows, &mut AcceptAll).unwrap();
    assert_eq!(report.generated, 2);
    assert!(report.is_clean());
    assert!(dir.join("0001.png").is_file());
    assert!(dir.join("0023.png").is_file());

    let img = image::open(dir.join("0001.png")).unwrap();
    assert_eq!((img.width(), img.height()), (16, 16));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn rerun_leaves_existing_outputs_untouched() {
    let dir = temp_dir("runner_idempotent");
    let ctx = context(dir.clone());
    let runner = BatchRunner::new(&ctx);
    let rows = vec![row(1, "1,2,3,1,2,3,1", "5")];

    runner.run(&rows, &mut AcceptAll).unwrap();
    let path = dir.join("0005.png");
    std::fs::write(&path, b"sentinel").unwrap();

    let report = runner.run(&rows, &mut AcceptAll).unwrap();
    assert_eq!(report.generated, 0);
    assert_eq!(report.already_present, 1);
    assert_eq!(std::fs::read(&path).unwrap(), b"sentinel");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn failing_item_does_not_stop_the_batch() {
    let dir = temp_dir("runner_isolation");
    let ctx = context(dir.clone());
    let runner = BatchRunner::new(&ctx);
    let rows = vec![
        row(1, "4,1,1,1,1,1,1", "1"),
        row(2, "1,1", "2"),
        row(3, "1,1,1,1,1,1,1", "3"),
    ];

    let report = runner.run(&rows, &mut AcceptAll).unwrap();
    assert_eq!(report.generated, 1);
    assert_eq!(report.failed.len(), 2);
    assert_eq!(report.failed[0].0, "1");
    assert!(report.failed[0].1.contains("index error"));
    assert!(!dir.join("0001.png").exists());
    assert!(!dir.join("0001.png.partial").exists());
    assert!(dir.join("0003.png").is_file());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn empty_table_writes_nothing() {
    let dir = temp_dir("runner_empty");
    let ctx = context(dir.clone());
    let report = BatchRunner::new(&ctx).run(&[], &mut AcceptAll).unwrap();
    assert_eq!(report, BatchReport::default());
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn prompt_skip_and_quit() {
    let dir = temp_dir("runner_prompt");
    let ctx = context(dir.clone());
    let runner = BatchRunner::new(&ctx);
    let rows = vec![
        row(1, "1,1,1,1,1,1,1", "1"),
        row(2, "1,1,1,1,1,1,1", "2"),
        row(3, "1,1,1,1,1,1,1", "3"),
        row(4, "1,1,1,1,1,1,1", "4"),
    ];
    let mut prompter = Scripted(vec![Decision::Accept, Decision::Skip, Decision::Quit]);

    let report = runner.run(&rows, &mut prompter).unwrap();
    assert_eq!(report.generated, 1);
    assert_eq!(report.skipped, 1);
    assert!(report.quit);
    assert!(dir.join("0001.png").is_file());
    assert!(!dir.join("0002.png").exists());
    assert!(!dir.join("0004.png").exists());

    std::fs::remove_dir_all(&dir).ok();
}
