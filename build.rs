#[cfg(target_os = "windows")]
fn main() {
    use winresource::WindowsResource;

    let mut res = WindowsResource::new();
    res.set("FileDescription", "rBooker CLI")
        .set("ProductName", "rBooker")
        .set("OriginalFilename", "rbooker.exe")
        .set("FileVersion", env!("CARGO_PKG_VERSION"))
        .set("ProductVersion", env!("CARGO_PKG_VERSION"))
        .compile()
        .expect("Failed to embed resource");
}

#[cfg(not(target_os = "windows"))]
fn main() {}
