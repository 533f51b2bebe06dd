use tinya51::{codec, load_key, process, Key, Rotation, TinyA51Error};

const KEY: &str = "10010101001110100110000";

#[test]
fn test_register_split() {
    let key = codec::parse_bits(KEY).unwrap();
    let state = load_key(&key).unwrap();

    assert_eq!(state.x().to_string(), "100101");
    assert_eq!(state.y().to_string(), "01001110");
    assert_eq!(state.z().to_string(), "100110000");
}

#[test]
fn test_encrypt_h_gives_d() {
    let key: Key = KEY.parse().unwrap();
    let plaintext = codec::parse_bits("111").unwrap();

    let (ciphertext, trace) = process(&key.load(), &plaintext, true).unwrap();
    let trace = trace.unwrap();

    assert_eq!(codec::format_bits(&trace.keystream()).unwrap(), "100");
    assert_eq!(codec::format_bits(&ciphertext).unwrap(), "011");
    assert_eq!(codec::bits_to_letters(&ciphertext).unwrap(), "D");

    // Step 0: control bits (0, 0, 1), majority 0, X and Y clock.
    let first = &trace.steps()[0];
    assert_eq!(first.control.as_array(), [0, 0, 1]);
    assert_eq!(first.majority, 0);
    assert_eq!(
        first.rotated,
        Rotation {
            x: true,
            y: true,
            z: false
        }
    );
    assert_eq!(&first.before, trace.initial());
}

#[test]
fn test_decrypt_d_gives_h() {
    let key: Key = KEY.parse().unwrap();
    let ciphertext = codec::letters_to_bits("D").unwrap();

    let plaintext = tinya51::decrypt(&key, &ciphertext).unwrap();
    assert_eq!(codec::format_bits(&plaintext).unwrap(), "111");
    assert_eq!(codec::bits_to_letters(&plaintext).unwrap(), "H");
}

#[test]
fn test_steps_chain() {
    let key: Key = KEY.parse().unwrap();
    let (_, trace) = process(&key.load(), &[1, 1, 1, 0, 0, 1], true).unwrap();
    let trace = trace.unwrap();

    for (i, pair) in trace.steps().windows(2).enumerate() {
        assert_eq!(pair[0].after, pair[1].before, "break between steps {i} and {}", i + 1);
    }
    for (i, record) in trace.iter().enumerate() {
        assert_eq!(record.step, i);
        assert_eq!(record.output_bit, record.data_bit ^ record.keystream_bit);
        assert_eq!(record.keystream_bit, record.after.keystream_bit());
    }
}

#[test]
fn test_key_length_rejected() {
    for len in [0, 1, 22, 24, 46] {
        let bits = vec![1u8; len];
        assert_eq!(
            load_key(&bits).unwrap_err(),
            TinyA51Error::InvalidKeyLength(len)
        );
    }
    assert!(load_key(&[1u8; 23]).is_ok());
}

#[test]
fn test_invalid_character_and_length() {
    assert!(matches!(
        codec::letters_to_bits("HI"),
        Err(TinyA51Error::InvalidCharacter { character: 'I', .. })
    ));
    assert_eq!(
        codec::bits_to_letters(&[0, 1]),
        Err(TinyA51Error::InvalidDataLength(2))
    );
}
