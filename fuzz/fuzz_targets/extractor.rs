#![no_main]

use libfuzzer_sys::fuzz_target;

use pagesift::Extractor;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes become (lossy) markup; no locator may panic on it.
    let html = String::from_utf8_lossy(data);
    let Ok(extractor) = Extractor::parse(&html, "https://example.com/base/") else {
        return;
    };

    let keyword = html.split_whitespace().next().unwrap_or("result");
    let _ = extractor.find_text(keyword, false);
    let _ = extractor.list_images();
    let _ = extractor.find_images_by_keyword(keyword);
    let _ = extractor.find_links_by_keyword(keyword);
    let _ = extractor.extract_section(keyword);
    let _ = extractor.extract_list_records(Some(keyword), Some(keyword));
    let _ = extractor.extract_card_records(None);
    let _ = extractor.texts_by_pattern(None);
    let _ = extractor.images_by_pattern(None);
    let _ = extractor.links_by_pattern(None);
});
