/// The XOR mask patterns applied to the encoding region of a symbol.

/// Return the masking function for a mask pattern reference from the
/// format field. The returned function takes (i, j) with i the row
/// coordinate and j the column coordinate and tells whether the module
/// at that position is flipped by the mask.
pub fn masking_function(pattern_index: u8) -> Box<dyn Fn(usize, usize) -> bool> {
    match pattern_index {
        0b000 => Box::new(| i,  j| { (i + j) % 2 == 0 }),
        0b001 => Box::new(| i, _j| { i % 2 == 0 }),
        0b010 => Box::new(|_i,  j| { j % 3 == 0 }),
        0b011 => Box::new(| i,  j| { (i + j) % 3 == 0 }),
        0b100 => Box::new(| i,  j| { (i / 2 + j / 3) % 2 == 0 }),
        0b101 => Box::new(| i,  j| { (i * j) % 2 + (i * j) % 3 == 0 }),
        0b110 => Box::new(| i,  j| { ((i * j) % 2 + (i * j) % 3) % 2 == 0 }),
        0b111 => Box::new(| i,  j| { ((i + j) % 2 + (i * j) % 3) % 2 == 0 }),
        _ => panic!("Wrong pattern index given!")
    }
}
