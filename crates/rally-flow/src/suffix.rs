//! 资源名称后缀
//!
//! 格式：`DD-MM-YYYY-HH-MM-xxxxxx`。时间部分取印度标准时间（UTC+05:30），
//! 末尾 6 位为随机 base36 字符，保证多次运行的资源名不会冲突。

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;

const IST_OFFSET_MINUTES: i64 = 5 * 60 + 30;
const TOKEN_LEN: usize = 6;
const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// 基于当前时间生成后缀
pub fn random_suffix() -> String {
    suffix_at(Utc::now(), &mut rand::rng())
}

/// 基于给定时间与随机源生成后缀
pub fn suffix_at<R: Rng>(now: DateTime<Utc>, rng: &mut R) -> String {
    let ist = now + TimeDelta::minutes(IST_OFFSET_MINUTES);
    let token: String = (0..TOKEN_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect();

    format!("{}-{}", ist.format("%d-%m-%Y-%H-%M"), token)
}
