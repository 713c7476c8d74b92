use bt_em::init::InitPolicy;
use bt_em::io::fit::{load_config, load_fit, save_config, save_fit};
use bt_em::io::triplets::read_triplets;
use bt_em::{BtFit, EmConfig};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_path(prefix: &str, ext: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time is before unix epoch")
        .as_nanos();
    path.push(format!("{prefix}_{}_{}.{}", std::process::id(), nanos, ext));
    path
}

#[test]
fn fit_json_roundtrip() {
    let path = unique_temp_path("bt_fit", "json");
    let fit = BtFit {
        pi: vec![0.25, 0.2, 0.55],
        iters: 8,
        converged: true,
    };

    save_fit(&path, &fit).expect("failed to save fit");
    let loaded = load_fit(&path).expect("failed to load fit");
    assert_eq!(loaded, fit);

    let _ = fs::remove_file(path);
}

#[test]
fn partial_config_uses_defaults() {
    let path = unique_temp_path("bt_config", "json");
    fs::write(&path, r#"{ "max_iter": 500, "init": "uniform" }"#).expect("failed to write config");

    let cfg = load_config(&path).expect("failed to load config");
    assert_eq!(cfg.max_iter, 500);
    assert_eq!(cfg.init, InitPolicy::Uniform);
    assert_eq!(cfg.epsilon, EmConfig::default().epsilon);

    save_config(&path, &cfg).expect("failed to save config");
    assert_eq!(load_config(&path).expect("reload"), cfg);

    let _ = fs::remove_file(path);
}

#[test]
fn read_plain_triplets() {
    let path = unique_temp_path("bt_triplets", "txt");
    let content = "\
# winner loser count
0 1 5
1 0 2

0 1 1
2 2 4
";
    fs::write(&path, content).expect("failed to write triplets");

    let w = read_triplets(&path, 3).expect("failed to read triplets");
    assert_eq!(w.get(0, 1), 6.0);
    assert_eq!(w.get(1, 0), 2.0);
    assert_eq!(w.get(2, 2), 4.0);
    assert_eq!(w.nnz(), 3);

    let _ = fs::remove_file(path);
}

#[test]
fn read_gz_triplets() {
    let path = unique_temp_path("bt_triplets_gz", "txt.gz");
    let file = fs::File::create(&path).expect("failed to create gz path");
    let mut writer = GzEncoder::new(file, Compression::default());
    writer
        .write_all(b"0 1 3\n1 0 1\n")
        .expect("failed to write gz data");
    writer.finish().expect("failed to finish gzip stream");

    let w = read_triplets(&path, 2).expect("failed to read gz triplets");
    assert_eq!(w.get(0, 1), 3.0);
    assert_eq!(w.get(1, 0), 1.0);

    let _ = fs::remove_file(path);
}

#[test]
fn read_triplets_reports_bad_lines() {
    let path = unique_temp_path("bt_triplets_bad", "txt");
    fs::write(&path, "0 1 3\n1 0\n").expect("failed to write triplets");
    let err = read_triplets(&path, 2).expect_err("expected malformed line error");
    let msg = format!("{err:#}");
    assert!(msg.contains("line 2"), "unexpected error message: {msg}");

    fs::write(&path, "0 5 3\n").expect("failed to write triplets");
    let err = read_triplets(&path, 2).expect_err("expected out-of-range error");
    let msg = format!("{err:#}");
    assert!(msg.contains("outside a 2x2 matrix"), "unexpected error message: {msg}");

    let _ = fs::remove_file(path);
}
