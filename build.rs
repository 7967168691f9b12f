fn main() {
    println!("cargo:rerun-if-changed=frontend/");

    // rust-embed needs the folder to exist at compile time
    let index = std::path::Path::new("frontend/index.html");
    if !index.exists() {
        eprintln!("Warning: frontend/index.html not found, writing a placeholder.");

        std::fs::create_dir_all("frontend").ok();
        std::fs::write(
            index,
            r#"<!DOCTYPE html>
<html>
<head><title>API Tester</title></head>
<body>
    <h1>API Tester</h1>
    <p>The backend is running but the request form was not embedded.</p>
    <p>Send requests with <code>POST /api/send</code> or through <code>/api/proxy/...</code>.</p>
</body>
</html>"#,
        )
        .ok();
    }
}
