// src/services/receipt_storage.rs

use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::{fs::OpenOptions, io::AsyncWriteExt};

// Tamanho máximo aceito no upload de comprovantes (10 MiB)
pub const MAX_RECEIPT_SIZE: usize = 10 << 20;

/// Guarda os comprovantes em disco e resolve o caminho de volta pelo nome gravado.
#[derive(Clone, Debug)]
pub struct ReceiptStorage {
    upload_dir: PathBuf,
}

impl ReceiptStorage {
    /// Cria a pasta de uploads se ela ainda não existir.
    pub async fn init(upload_dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let upload_dir = upload_dir.into();
        tokio::fs::create_dir_all(&upload_dir).await?;
        Ok(Self { upload_dir })
    }

    /// Grava o arquivo como `<timestamp unix>_<nome original>` e devolve o nome gravado.
    pub async fn save(&self, bytes: &[u8], original_name: &str) -> std::io::Result<String> {
        let filename = format!("{}_{}", Utc::now().timestamp(), sanitize(original_name));
        self.write_new(&filename, bytes).await?;

        tracing::debug!("📎 Comprovante gravado: {}", filename);
        Ok(filename)
    }

    // Nunca sobrescreve: um nome repetido no mesmo segundo falha com `AlreadyExists`
    async fn write_new(&self, filename: &str, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.upload_dir.join(filename))
            .await?;
        file.write_all(bytes).await?;
        file.flush().await
    }

    pub fn path_for(&self, stored_filename: &str) -> PathBuf {
        self.upload_dir.join(sanitize(stored_filename))
    }

    /// Remove um comprovante órfão (ex: o pagamento falhou depois do upload).
    pub async fn discard(&self, stored_filename: &str) {
        if let Err(e) = tokio::fs::remove_file(self.path_for(stored_filename)).await {
            tracing::warn!("Falha ao remover comprovante {}: {}", stored_filename, e);
        }
    }
}

// Só o último componente do caminho: nada de "../" saindo da pasta de uploads
fn sanitize(name: &str) -> String {
    Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("receipt")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_prefixes_the_unix_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ReceiptStorage::init(dir.path().join("uploads")).await.unwrap();

        let before = Utc::now().timestamp();
        let stored = storage.save(b"%PDF-1.4", "boleto.pdf").await.unwrap();
        let after = Utc::now().timestamp();

        let (timestamp, original) = stored.split_once('_').unwrap();
        let timestamp: i64 = timestamp.parse().unwrap();
        assert!(timestamp >= before && timestamp <= after);
        assert_eq!(original, "boleto.pdf");

        let content = tokio::fs::read(storage.path_for(&stored)).await.unwrap();
        assert_eq!(content, b"%PDF-1.4");
    }

    #[tokio::test]
    async fn path_components_are_stripped_from_names() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = dir.path().join("uploads");
        let storage = ReceiptStorage::init(&uploads).await.unwrap();

        let stored = storage.save(b"x", "../../etc/passwd").await.unwrap();
        assert!(stored.ends_with("_passwd"));
        assert_eq!(storage.path_for("../secret.txt"), uploads.join("secret.txt"));
    }

    #[tokio::test]
    async fn existing_receipt_is_never_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ReceiptStorage::init(dir.path()).await.unwrap();

        storage.write_new("1700000000_nota.pdf", b"primeiro").await.unwrap();
        let err = storage
            .write_new("1700000000_nota.pdf", b"segundo")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::AlreadyExists);

        let content = tokio::fs::read(storage.path_for("1700000000_nota.pdf"))
            .await
            .unwrap();
        assert_eq!(content, b"primeiro");
    }

    #[tokio::test]
    async fn discard_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ReceiptStorage::init(dir.path()).await.unwrap();

        let stored = storage.save(b"x", "nota.png").await.unwrap();
        storage.discard(&stored).await;
        assert!(!storage.path_for(&stored).exists());
    }
}
