//! 交互式输入 - 业务能力层
//!
//! 首次运行时收集设置，以及在多个端点之间选择。
//! 读写端都是泛型参数，测试时可以直接传入内存缓冲区。

use crate::config::Settings;
use std::io::{self, BufRead, Write};

const SEPARATOR: &str = "------------------";
const PROMPT: &str = "--> ";

/// 交互式收集设置
///
/// 依次询问：基础 URL、是否使用 SSL、要测试的端点（逗号分隔）
pub fn collect_settings<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> io::Result<Settings> {
    writeln!(writer, "没有找到设置文件，现在创建一个")?;

    let base_url = ask(reader, writer, "请输入基础 URL:")?.unwrap_or_default();
    let use_ssl = ask(reader, writer, "是否使用 SSL?")?
        .and_then(|answer| parse_bool(&answer))
        .unwrap_or(false);
    let endpoints = ask(reader, writer, "请输入要测试的端点（用 , 分隔）:")?
        .filter(|answer| !answer.is_empty())
        .map(|answer| answer.split(',').map(str::to_string).collect())
        .unwrap_or_default();

    writeln!(writer, "设置文件已创建")?;

    Ok(Settings {
        base_url,
        use_ssl,
        endpoints,
    })
}

/// 选择本次使用的端点
///
/// - 没有配置端点：直接输入一个
/// - 只有一个端点：直接使用
/// - 多个端点：输入序号（从 1 开始）；无法解析或超出范围时使用第 1 个，
///   小于 1 时重新输入
pub fn choose_endpoint<R: BufRead, W: Write>(
    settings: &Settings,
    reader: &mut R,
    writer: &mut W,
) -> io::Result<String> {
    match settings.endpoints.as_slice() {
        [] => {
            writeln!(writer, "请输入要使用的端点:")?;
            write!(writer, "{}", PROMPT)?;
            writer.flush()?;
            Ok(read_line(reader)?.unwrap_or_default())
        }
        [only] => Ok(only.clone()),
        endpoints => {
            for (i, endpoint) in endpoints.iter().enumerate() {
                writeln!(writer, "{}: {}", i + 1, endpoint)?;
            }
            writeln!(writer, "请选择要使用的端点:")?;

            loop {
                write!(writer, "{}", PROMPT)?;
                writer.flush()?;

                let Some(answer) = read_line(reader)? else {
                    return Ok(endpoints[0].clone());
                };

                match answer.trim().parse::<i64>() {
                    Ok(n) if n <= 0 => continue,
                    Ok(n) if (n as usize) <= endpoints.len() => {
                        return Ok(endpoints[n as usize - 1].clone());
                    }
                    _ => return Ok(endpoints[0].clone()),
                }
            }
        }
    }
}

/// 打印问题并读取一行回答，输入结束时返回 `None`
fn ask<R: BufRead, W: Write>(reader: &mut R, writer: &mut W, question: &str) -> io::Result<Option<String>> {
    writeln!(writer, "{}", SEPARATOR)?;
    writeln!(writer, "{}", question)?;
    write!(writer, "{}", PROMPT)?;
    writer.flush()?;
    read_line(reader)
}

fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// 布尔字面量解析：1/t/T/true/TRUE/True 以及对应的 false 写法
fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn settings_with(endpoints: &[&str]) -> Settings {
        Settings {
            base_url: "http://localhost".to_string(),
            use_ssl: false,
            endpoints: endpoints.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_collect_settings() {
        let mut input = Cursor::new("http://localhost:3000\nT\n/upload,/convert\n");
        let mut output = Vec::<u8>::new();

        let settings = collect_settings(&mut input, &mut output).unwrap();

        assert_eq!(settings.base_url, "http://localhost:3000");
        assert!(settings.use_ssl);
        assert_eq!(settings.endpoints, vec!["/upload", "/convert"]);
        assert!(String::from_utf8(output).unwrap().contains("请输入基础 URL"));
    }

    #[test]
    fn test_collect_settings_unparsable_ssl_and_eof() {
        let mut input = Cursor::new("http://localhost\nyes please\n");
        let mut output = Vec::<u8>::new();

        let settings = collect_settings(&mut input, &mut output).unwrap();

        assert!(!settings.use_ssl);
        assert!(settings.endpoints.is_empty());
    }

    #[test]
    fn test_choose_single_endpoint_without_prompt() {
        let mut input = Cursor::new("");
        let mut output = Vec::<u8>::new();

        let chosen = choose_endpoint(&settings_with(&["/only"]), &mut input, &mut output).unwrap();

        assert_eq!(chosen, "/only");
        assert!(output.is_empty());
    }

    #[test]
    fn test_choose_free_text_when_none_configured() {
        let mut input = Cursor::new("/typed\n");
        let mut output = Vec::<u8>::new();

        let chosen = choose_endpoint(&settings_with(&[]), &mut input, &mut output).unwrap();
        assert_eq!(chosen, "/typed");
    }

    #[test]
    fn test_choose_by_number() {
        let settings = settings_with(&["/a", "/b", "/c"]);

        let mut output = Vec::<u8>::new();
        let chosen = choose_endpoint(&settings, &mut Cursor::new("2\n"), &mut output).unwrap();
        assert_eq!(chosen, "/b");

        let listing = String::from_utf8(output).unwrap();
        assert!(listing.contains("1: /a"));
        assert!(listing.contains("3: /c"));
    }

    #[test]
    fn test_choose_falls_back_to_first() {
        let settings = settings_with(&["/a", "/b"]);

        let out_of_range = choose_endpoint(&settings, &mut Cursor::new("9\n"), &mut Vec::<u8>::new()).unwrap();
        assert_eq!(out_of_range, "/a");

        let garbage = choose_endpoint(&settings, &mut Cursor::new("abc\n"), &mut Vec::<u8>::new()).unwrap();
        assert_eq!(garbage, "/a");
    }

    #[test]
    fn test_choose_reprompts_on_non_positive() {
        let settings = settings_with(&["/a", "/b"]);

        let chosen = choose_endpoint(&settings, &mut Cursor::new("0\n-3\n2\n"), &mut Vec::<u8>::new()).unwrap();
        assert_eq!(chosen, "/b");

        // 输入结束时使用第 1 个
        let chosen = choose_endpoint(&settings, &mut Cursor::new("0\n"), &mut Vec::<u8>::new()).unwrap();
        assert_eq!(chosen, "/a");
    }
}
