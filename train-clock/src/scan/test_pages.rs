//! Hand-built results pages for scanner and finder tests.
//!
//! Rows are written without indentation: whitespace between cells becomes
//! text at the last opened tag, and a long enough run would be taken as a
//! line label.

/// Station heading, a `b > font` inside its own row.
pub fn marker(station: &str) -> String {
    format!("<tr><td><b><font>{station}</font></b></td></tr>\n")
}

/// A line label row followed by a time row.
pub fn route_row(line: &str, time: &str) -> String {
    format!(
        "<tr><td><img src=\"a.gif\"></td><td><img src=\"b.gif\"></td>\
         <td><img src=\"c.gif\"></td><td><img src=\"d.gif\"></td>\
         <td><b><font>{line}</font></b></td></tr>\n\
         <tr><td><font>{time}</font></td></tr>\n"
    )
}

/// Wrap rows in a minimal document with a single table.
pub fn page(rows: &[String]) -> String {
    format!(
        "<html><head><title>Route</title></head><body><table>\n{}</table></body></html>",
        rows.concat()
    )
}

/// Two alternative routes; only the first lies between the headings.
pub const ROUTE_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Jorudan route search: Tameikesan-No to Shibuya</title></head>
<body>
<h1>Route 1 of 2</h1>
<p>Search from Tameikesan-No to Shibuya</p>
<table>
<tr><td><b><font>Tameikesan-No</font></b></td></tr>
<tr><td><img src="st.gif"></td><td><img src="ln.gif"></td><td><img src="ln.gif"></td><td><img src="tr.gif"></td><td><b><font>Tokyo Metro Namboku Line (for Meguro)</font></b></td></tr>
<tr><td><font>7:05am - 7:07am</font></td><td><font>170 yen</font></td></tr>
<tr><td><img src="st.gif"></td><td><img src="ln.gif"></td><td><img src="ln.gif"></td><td><img src="tr.gif"></td><td><b><font>Tokyo Metro Ginza Line (for Shibuya)</font></b></td></tr>
<tr><td><font>7:14am - 7:21am</font></td><td><font>Platform 1</font></td></tr>
<tr><td><b><font>Shibuya</font></b></td></tr>
</table>
<h1>Route 2 of 2</h1>
<table>
<tr><td><b><font>Tameikesan-No</font></b></td></tr>
<tr><td><img src="st.gif"></td><td><img src="ln.gif"></td><td><img src="ln.gif"></td><td><img src="tr.gif"></td><td><b><font>Tokyo Metro Ginza Line (for Shibuya)</font></b></td></tr>
<tr><td><font>7:20am - 7:27am</font></td></tr>
<tr><td><b><font>Shibuya</font></b></td></tr>
</table>
</body>
</html>
"#;
