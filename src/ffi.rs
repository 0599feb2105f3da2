//! C FFI layer for cross-language interoperability.
//!
//! All functions use the default page configuration. Strings are
//! NUL-terminated UTF-8 and every returned string is owned by the caller,
//! who must release it with `docsearch_free_string` or `docsearch_free_result`.

use crate::config::{PageConfig, SearchConfig};
use crate::search::matches;
use libc::{c_char, c_int};
use std::ffi::{CStr, CString};
use std::ptr;

/// Result type for FFI operations.
#[repr(C)]
pub struct DocSearchResult {
    /// Pointer to result string (caller must free with docsearch_free_string)
    pub data: *mut c_char,
    /// Error message if data is null (caller must free with docsearch_free_string)
    pub error: *mut c_char,
}

impl DocSearchResult {
    fn ok(data: String) -> Self {
        match CString::new(data) {
            Ok(c_string) => Self {
                data: c_string.into_raw(),
                error: ptr::null_mut(),
            },
            Err(e) => Self::err(format!(
                "Output contains a NUL byte at position {}",
                e.nul_position()
            )),
        }
    }

    fn err(error: String) -> Self {
        let c_string = CString::new(error.replace('\0', "\u{fffd}")).unwrap_or_default();
        Self {
            data: ptr::null_mut(),
            error: c_string.into_raw(),
        }
    }

    fn from_result(result: crate::Result<String>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(e.to_string()),
        }
    }
}

/// Borrow a C string as `&str`, or `None` for null / invalid UTF-8.
unsafe fn borrow_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    CStr::from_ptr(s).to_str().ok()
}

/// Check whether `query` fuzzy-matches `text` (both lower-cased by the callee).
///
/// Returns 1 for a match, 0 for no match, -1 for invalid input.
///
/// # Safety
///
/// - `text` and `query` must be valid null-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn docsearch_fuzzy_match(text: *const c_char, query: *const c_char) -> c_int {
    let (Some(text), Some(query)) = (borrow_str(text), borrow_str(query)) else {
        return -1;
    };
    c_int::from(matches(&text.to_lowercase(), &query.to_lowercase()))
}

/// Highlight `query` in HTML markup.
///
/// On success `matches_out` (if not null) receives the number of matches.
///
/// # Safety
///
/// - `html` and `query` must be valid null-terminated UTF-8 strings.
/// - `matches_out` must be null or point to writable memory.
/// - The returned strings must be freed with `docsearch_free_result`.
#[no_mangle]
pub unsafe extern "C" fn docsearch_highlight_html(
    html: *const c_char,
    query: *const c_char,
    matches_out: *mut c_int,
) -> DocSearchResult {
    let (Some(html), Some(query)) = (borrow_str(html), borrow_str(query)) else {
        return DocSearchResult::err("Invalid input string".to_string());
    };

    match crate::highlight_html(html, query, &SearchConfig::default()) {
        Ok(summary) => {
            if !matches_out.is_null() {
                *matches_out = c_int::try_from(summary.matches).unwrap_or(c_int::MAX);
            }
            DocSearchResult::ok(summary.html)
        }
        Err(e) => DocSearchResult::err(e.to_string()),
    }
}

/// Remove every highlight wrapper from HTML markup.
///
/// # Safety
///
/// - `html` must be a valid null-terminated UTF-8 string.
/// - The returned strings must be freed with `docsearch_free_result`.
#[no_mangle]
pub unsafe extern "C" fn docsearch_clear_highlights_html(html: *const c_char) -> DocSearchResult {
    let Some(html) = borrow_str(html) else {
        return DocSearchResult::err("Invalid input string".to_string());
    };
    DocSearchResult::from_result(crate::clear_highlights_html(html, &SearchConfig::default()))
}

/// Apply the list filter to HTML markup.
///
/// # Safety
///
/// - `html` and `query` must be valid null-terminated UTF-8 strings.
/// - The returned strings must be freed with `docsearch_free_result`.
#[no_mangle]
pub unsafe extern "C" fn docsearch_filter_list_html(
    html: *const c_char,
    query: *const c_char,
) -> DocSearchResult {
    let (Some(html), Some(query)) = (borrow_str(html), borrow_str(query)) else {
        return DocSearchResult::err("Invalid input string".to_string());
    };
    DocSearchResult::from_result(crate::filter_list_html(html, query, &SearchConfig::default()))
}

/// Apply the page enhancements to HTML markup.
///
/// # Safety
///
/// - `html` and `page_path` must be valid null-terminated UTF-8 strings.
/// - The returned strings must be freed with `docsearch_free_result`.
#[no_mangle]
pub unsafe extern "C" fn docsearch_enhance_html(
    html: *const c_char,
    page_path: *const c_char,
) -> DocSearchResult {
    let (Some(html), Some(page_path)) = (borrow_str(html), borrow_str(page_path)) else {
        return DocSearchResult::err("Invalid input string".to_string());
    };
    DocSearchResult::from_result(crate::enhance_html(html, &PageConfig::default(), page_path))
}

/// Free a string returned by docsearch functions.
///
/// # Safety
///
/// - `s` must be a pointer returned by a docsearch function, or null.
#[no_mangle]
pub unsafe extern "C" fn docsearch_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// Free a result struct.
///
/// # Safety
///
/// - `result` must be a valid DocSearchResult.
#[no_mangle]
pub unsafe extern "C" fn docsearch_free_result(result: DocSearchResult) {
    docsearch_free_string(result.data);
    docsearch_free_string(result.error);
}

/// Get the library version.
///
/// # Safety
///
/// The returned string is static and must not be freed.
#[no_mangle]
pub extern "C" fn docsearch_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

// Generate C header content for documentation
/// ```c
/// // docsite_search.h
/// #ifndef DOCSITE_SEARCH_H
/// #define DOCSITE_SEARCH_H
///
/// typedef struct {
///     char* data;
///     char* error;
/// } DocSearchResult;
///
/// int docsearch_fuzzy_match(const char* text, const char* query);
/// DocSearchResult docsearch_highlight_html(const char* html, const char* query, int* matches_out);
/// DocSearchResult docsearch_clear_highlights_html(const char* html);
/// DocSearchResult docsearch_filter_list_html(const char* html, const char* query);
/// DocSearchResult docsearch_enhance_html(const char* html, const char* page_path);
/// void docsearch_free_string(char* s);
/// void docsearch_free_result(DocSearchResult result);
/// const char* docsearch_version(void);
///
/// #endif
/// ```
const _: () = ();

#[cfg(test)]
mod tests {
    use super::*;

    fn take(result: DocSearchResult) -> Result<String, String> {
        unsafe {
            let out = if result.data.is_null() {
                Err(CStr::from_ptr(result.error).to_string_lossy().into_owned())
            } else {
                Ok(CStr::from_ptr(result.data).to_string_lossy().into_owned())
            };
            docsearch_free_result(result);
            out
        }
    }

    #[test]
    fn test_fuzzy_match() {
        let text = CString::new("Beta Tutorial").unwrap();
        let hit = CString::new("TA").unwrap();
        let miss = CString::new("zz").unwrap();
        unsafe {
            assert_eq!(docsearch_fuzzy_match(text.as_ptr(), hit.as_ptr()), 1);
            assert_eq!(docsearch_fuzzy_match(text.as_ptr(), miss.as_ptr()), 0);
            assert_eq!(docsearch_fuzzy_match(ptr::null(), hit.as_ptr()), -1);
        }
    }

    #[test]
    fn test_highlight_html() {
        let html = CString::new(r#"<div id="doc-content"><p>The quick brown fox</p></div>"#).unwrap();
        let query = CString::new("quick").unwrap();
        let mut count: c_int = -1;
        let result = unsafe { docsearch_highlight_html(html.as_ptr(), query.as_ptr(), &mut count) };

        assert_eq!(
            take(result).unwrap(),
            r#"<div id="doc-content"><p>The <span class="highlight">quick</span> brown fox</p></div>"#
        );
        assert_eq!(count, 1);
    }

    #[test]
    fn test_highlight_html_nul_reference() {
        let html = CString::new(r#"<div id="doc-content"><p>quick &#0; fox</p></div>"#).unwrap();
        let query = CString::new("quick").unwrap();
        let mut count: c_int = -1;
        let result = unsafe { docsearch_highlight_html(html.as_ptr(), query.as_ptr(), &mut count) };

        assert_eq!(
            take(result).unwrap(),
            "<div id=\"doc-content\"><p><span class=\"highlight\">quick</span> \u{fffd} fox</p></div>"
        );
        assert_eq!(count, 1);
    }

    #[test]
    fn test_nul_in_output_is_an_error() {
        let message = take(DocSearchResult::ok("a\0b".to_string())).unwrap_err();
        assert!(message.contains("NUL byte at position 1"));
        let message = take(DocSearchResult::err("bad\0input".to_string())).unwrap_err();
        assert_eq!(message, "bad\u{fffd}input");
    }

    #[test]
    fn test_error_result() {
        let html = CString::new("<!-- open").unwrap();
        let result = unsafe { docsearch_clear_highlights_html(html.as_ptr()) };
        assert!(take(result).unwrap_err().contains("Unterminated comment"));
    }

    #[test]
    fn test_version() {
        let version = unsafe { CStr::from_ptr(docsearch_version()) };
        assert_eq!(version.to_str().unwrap(), env!("CARGO_PKG_VERSION"));
    }
}
