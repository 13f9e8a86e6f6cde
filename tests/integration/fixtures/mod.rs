// Test fixtures with known K-5 reading passages
// WHY: Property tests need deterministic passages covering each supported language

#![allow(dead_code)]

/// Short English passage with clear sentence boundaries
pub const ENGLISH_TEXT: &str = "The cat sat on the mat. The dog ran to the park. \
They like to play with my friend.";

/// Standard Spanish passage with accents and inverted marks
pub const SPANISH_TEXT: &str = "Los niños juegan en el parque con sus amigos. \
¿Dónde está la maestra? ¡Está en la escuela con los libros!";

/// Puerto Rican Spanish sentence with a dialect tag question
pub const PUERTO_RICAN_TEXT: &str = "Los niños juegan en la guagua, ¿verdad?";

/// Code-switched passage mixing Spanish and English
pub const CODE_SWITCHED_TEXT: &str = "Mi mamá y yo fuimos al mall. Estaba shopping \
con mi prima y después vamos a janguear en la playa.";

/// Multi-paragraph passage with irregular whitespace and CRLF line endings
pub const MESSY_TEXT: &str = "  The  sun is hot.\r\n\r\n\r\n\tWe go to the beach!   \
It is fun.\r\nMom packs   lunch.  ";

/// Text with no sentences at all
pub const PUNCTUATION_ONLY_TEXT: &str = "... !!! ???";
