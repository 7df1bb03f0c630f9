//! Integration tests for converting a directory tree

#[cfg(test)]
mod tree_tests {
    use image::{Rgb, RgbImage};
    use std::fs;
    use std::path::Path;
    use std::process::Command;
    use tempfile::tempdir;

    fn run_webpconv(args: &[&str]) -> Result<(String, String, bool), String> {
        let output = Command::new(env!("CARGO_BIN_EXE_webpconv"))
            .args(args)
            .env_remove("RUST_LOG")
            .output()
            .map_err(|e| format!("Failed to run webpconv: {}", e))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        Ok((stdout, stderr, output.status.success()))
    }

    fn write_jpeg(path: &Path) {
        RgbImage::from_pixel(12, 8, Rgb([30, 160, 90]))
            .save_with_format(path, image::ImageFormat::Jpeg)
            .unwrap();
    }

    #[test]
    fn test_images_scenario() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("sub")).unwrap();
        write_jpeg(&root.path().join("a.jpg"));
        write_jpeg(&root.path().join("sub/b.JPG"));
        fs::write(root.path().join("c.txt"), "leave me").unwrap();

        let (stdout, stderr, success) =
            run_webpconv(&[root.path().to_str().unwrap()]).unwrap();

        assert!(success, "Command should succeed: {}", stderr);
        assert!(stderr.is_empty(), "No error expected: {}", stderr);
        assert!(stdout.starts_with("Starting conversion to WebP..."));
        assert!(stdout.trim_end().ends_with("Conversion completed!"));
        assert_eq!(stdout.lines().filter(|l| l.starts_with("Converted: ")).count(), 2);
        assert!(stdout.contains(&format!(
            "Converted: {} -> {}",
            root.path().join("a.jpg").display(),
            root.path().join("a.webp").display()
        )));

        let a = image::open(root.path().join("a.webp")).unwrap();
        assert_eq!((a.width(), a.height()), (12, 8));
        assert!(root.path().join("sub/b.webp").exists());
        assert_eq!(fs::read_to_string(root.path().join("c.txt")).unwrap(), "leave me");
        assert!(!root.path().join("c.webp").exists());
    }

    #[test]
    fn test_rerun_overwrites_destinations() {
        let root = tempdir().unwrap();
        write_jpeg(&root.path().join("a.jpg"));
        fs::write(root.path().join("a.webp"), b"stale").unwrap();

        let args = [root.path().to_str().unwrap()];
        let (_, stderr, success) = run_webpconv(&args).unwrap();
        assert!(success, "{}", stderr);
        let first = fs::read(root.path().join("a.webp")).unwrap();
        assert_ne!(first, b"stale");

        let (stdout, stderr, success) = run_webpconv(&args).unwrap();
        assert!(success, "{}", stderr);
        assert!(stdout.contains("Converted: "));
        assert!(image::open(root.path().join("a.webp")).is_ok());
    }

    #[test]
    fn test_skip_existing_keeps_destination() {
        let root = tempdir().unwrap();
        write_jpeg(&root.path().join("a.jpg"));
        write_jpeg(&root.path().join("b.jpg"));
        fs::write(root.path().join("a.webp"), b"hand edited").unwrap();

        let (stdout, stderr, success) =
            run_webpconv(&[root.path().to_str().unwrap(), "--skip-existing"]).unwrap();
        assert!(success, "{}", stderr);
        assert_eq!(fs::read(root.path().join("a.webp")).unwrap(), b"hand edited");
        assert!(root.path().join("b.webp").exists());
        assert!(stdout.contains("Skipped: "));
        assert_eq!(stdout.lines().filter(|l| l.starts_with("Converted: ")).count(), 1);
    }

    #[test]
    fn test_worker_pool_converts_everything() {
        let root = tempdir().unwrap();
        for i in 0..8 {
            let dir = root.path().join(format!("album{}", i % 2));
            fs::create_dir_all(&dir).unwrap();
            write_jpeg(&dir.join(format!("p{}.jpg", i)));
        }

        let (stdout, stderr, success) =
            run_webpconv(&[root.path().to_str().unwrap(), "--jobs", "4"]).unwrap();
        assert!(success, "{}", stderr);
        assert_eq!(stdout.lines().filter(|l| l.starts_with("Converted: ")).count(), 8);
        for i in 0..8 {
            assert!(root
                .path()
                .join(format!("album{}/p{}.webp", i % 2, i))
                .exists());
        }
    }

    #[test]
    fn test_stats_json_written() {
        let root = tempdir().unwrap();
        write_jpeg(&root.path().join("a.jpg"));
        let out = tempdir().unwrap();
        let stats_path = out.path().join("stats.json");

        let (stdout, stderr, success) = run_webpconv(&[
            root.path().to_str().unwrap(),
            "--stats",
            "--stats-json",
            stats_path.to_str().unwrap(),
        ])
        .unwrap();
        assert!(success, "{}", stderr);
        assert!(stdout.contains("Conversion Statistics:"));

        let stats: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&stats_path).unwrap()).unwrap();
        assert_eq!(stats["converted"], 1);
        assert_eq!(stats["failed"], 0);
    }
}
