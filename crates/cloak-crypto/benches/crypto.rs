use cloak_crypto::{decrypt_metadata, encrypt_metadata, MasterKey, MasterKeySet};

fn file_metadata() -> String {
    r#"{"name":"holiday-2026.jpg","size":4183021,"mime":"image/jpeg","key":"f3a9c0d1e2b4a6c8f3a9c0d1e2b4a6c8","lastModified":1760608800000}"#
        .to_string()
}

#[divan::bench]
fn bench_encrypt_metadata(bencher: divan::Bencher) {
    let key = MasterKey::from("0123456789abcdef0123456789abcdef");
    let metadata = file_metadata();
    bencher.bench(|| {
        encrypt_metadata(divan::black_box(&metadata), divan::black_box(&key)).unwrap()
    });
}

#[divan::bench]
fn bench_decrypt_metadata(bencher: divan::Bencher) {
    let key = MasterKey::from("0123456789abcdef0123456789abcdef");
    let envelope = encrypt_metadata(&file_metadata(), &key).unwrap();
    bencher.bench(|| {
        decrypt_metadata(divan::black_box(&envelope), divan::black_box(&key)).unwrap()
    });
}

/// Worst case for a rotated account: the item was sealed under the oldest key.
#[divan::bench(args = [1, 4, 8])]
fn bench_decrypt_oldest_of_n_keys(bencher: divan::Bencher, n: usize) {
    let keys: Vec<MasterKey> = (0..n)
        .map(|i| MasterKey::from(format!("master-key-{i:02}").as_str()))
        .collect();
    let envelope = encrypt_metadata(&file_metadata(), &keys[0]).unwrap();
    let set = MasterKeySet::new(keys).unwrap();
    bencher.bench(|| set.decrypt_metadata(divan::black_box(&envelope)).unwrap());
}

fn main() {
    divan::main();
}
