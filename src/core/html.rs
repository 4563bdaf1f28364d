// src/core/html.rs
pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Next `<o …>…c` block at or after `from`, as byte offsets (end exclusive).
/// `lc` is `to_lower(s)`, computed once by the caller; offsets line up because only
/// ASCII is folded.
pub fn next_tag_block_ci(s: &str, lc: &str, o: &str, c: &str, from: usize) -> Option<(usize, usize)> {
    let ol = to_lower(o);
    let cl = to_lower(c);
    let start = lc.get(from..)?.find(&ol)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&cl)?;
    let end = open_end + end_rel + c.len();
    Some((start, end))
}

/// Text of the first cell (`<td>`/`<th>`) carrying `attr="value"`, tags stripped.
pub fn cell_text_by_attr(row: &str, attr: &str, value: &str) -> Option<String> {
    let lc = to_lower(row);
    let needle = format!("{}=\"{}\"", to_lower(attr), to_lower(value));
    let at = lc.find(&needle)?;
    let open_end = row[at..].find('>')? + at + 1;
    let close = lc[open_end..].find("</t")? + open_end;
    Some(strip_tags(super::sanitize::normalize_entities(&row[open_end..close])))
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: &str = r#"<tr ><th scope="row" class="right " data-stat="team_game" >12</th><td class="left " data-stat="date_game" csk="2003-04-12"><a href="/boxes/BAL/BAL200304120.shtml">Saturday,&nbsp;Apr 12</a></td><td class="center " data-stat="win_loss_result" >L</td><td class="center " data-stat="win_loss_record" >6-6</td></tr>"#;

    #[test]
    fn cell_lookup_by_data_stat() {
        assert_eq!(cell_text_by_attr(ROW, "data-stat", "team_game").as_deref(), Some("12"));
        assert_eq!(cell_text_by_attr(ROW, "data-stat", "date_game").as_deref(), Some("Saturday, Apr 12"));
        assert_eq!(cell_text_by_attr(ROW, "DATA-STAT", "win_loss_record").as_deref(), Some("6-6"));
        assert_eq!(cell_text_by_attr(ROW, "data-stat", "attendance"), None);
    }

    #[test]
    fn tag_blocks_walk_in_order() {
        let doc = "<TABLE><tr><td>a</td></tr><TR><td>b</td></TR></TABLE>";
        let lc = to_lower(doc);
        let (s1, e1) = next_tag_block_ci(doc, &lc, "<tr", "</tr>", 0).unwrap();
        assert_eq!(strip_tags(&doc[s1..e1]), "a");
        let (s2, e2) = next_tag_block_ci(doc, &lc, "<tr", "</tr>", e1).unwrap();
        assert_eq!(strip_tags(&doc[s2..e2]), "b");
        assert!(next_tag_block_ci(doc, &lc, "<tr", "</tr>", e2).is_none());
    }
}
