#![no_main]
use libfuzzer_sys::fuzz_target;
use xmlarbor::xpath::evaluate;
use xmlarbor::Tree;

fuzz_target!(|data: &[u8]| {
    if let Ok(path) = std::str::from_utf8(data) {
        let mut tree = Tree::new();
        let Ok(plano) = tree.create_entity("plano", None) else {
            return;
        };
        if let Ok(fuc) = tree.create_entity("fuc", Some(plano)) {
            let _ = tree.add_attribute(fuc, "codigo", "M4310");
            if let Ok(nome) = tree.create_entity("nome", Some(fuc)) {
                let _ = tree.create_text("Programação Avançada", Some(nome));
            }
        }
        // Path evaluation should never panic on any input
        let _ = evaluate(&tree, plano, path);
    }
});
