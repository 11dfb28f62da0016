use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::io::BufReader;
use std::io::Write;

use std::path::Path;

pub fn read_string<P: AsRef<Path>>(input: P) -> io::Result<String> {
    let file = File::open(input)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

pub fn write_all<P: AsRef<Path>>(output: P, content: &[u8]) -> io::Result<()> {
    let o = output.as_ref();
    if let Some(parent) = o.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = File::create(o)?;
    file.write_all(content)
}

pub fn write_string<P: AsRef<Path>, S: AsRef<str>>(
    output: P,
    content: S,
) -> io::Result<()> {
    write_all(output, content.as_ref().as_bytes())
}

/// Write to a sibling file then rename over the target so readers
/// never observe a partially written file.
pub fn replace_string<P: AsRef<Path>, S: AsRef<str>>(
    output: P,
    content: S,
) -> io::Result<()> {
    let o = output.as_ref();
    let mut name = o
        .file_name()
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Not a file path: {}", o.display()),
            )
        })?
        .to_os_string();
    name.push(".tmp");
    let staging = o.with_file_name(name);
    write_string(&staging, content)?;
    std::fs::rename(&staging, o)
}

/// Remove a directory tree, treating an absent directory as success.
pub fn remove_dir_all<P: AsRef<Path>>(target: P) -> io::Result<bool> {
    match std::fs::remove_dir_all(target.as_ref()) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_creates_parents() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let file = dir.path().join("a/b/c.txt");
        write_string(&file, "hello")?;
        assert_eq!("hello", read_string(&file)?);
        Ok(())
    }

    #[test]
    fn replace_overwrites_contents() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let file = dir.path().join("marker.txt");
        write_string(&file, "a much longer original value")?;
        replace_string(&file, "short")?;
        assert_eq!("short", read_string(&file)?);
        assert!(!dir.path().join("marker.txt.tmp").exists());
        Ok(())
    }

    #[test]
    fn remove_missing_dir() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let target = dir.path().join("missing");
        assert_eq!(false, remove_dir_all(&target)?);
        std::fs::create_dir_all(target.join("nested"))?;
        assert_eq!(true, remove_dir_all(&target)?);
        assert!(!target.exists());
        Ok(())
    }
}
