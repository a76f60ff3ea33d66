//! # Transaction Marshaling
//!
//! Decoding of aggregator transaction payloads and the two submission-mode
//! re-encodings: local signing after a blockhash refresh, and the unsigned
//! rebuild handed to the custodial signer.

use anyhow::{anyhow, bail, Result};
use base64::{engine::general_purpose, Engine as _};
use solana_sdk::hash::Hash;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::message::{Message, VersionedMessage};
use solana_sdk::signature::Keypair;
use solana_sdk::system_program;
use solana_sdk::transaction::{Transaction, VersionedTransaction};

/// Decode a base64 transaction payload returned by the aggregator.
pub fn decode_swap_transaction(payload: &str) -> Result<VersionedTransaction> {
    let tx_bytes = general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| anyhow!("Invalid base64 transaction: {}", e))?;

    bincode::deserialize(&tx_bytes).map_err(|e| anyhow!("Invalid transaction format: {}", e))
}

/// Sign a decoded transaction with a fresh blockhash.
///
/// The aggregator's blockhash may already be stale by the time the payload
/// arrives, so the message is stamped with the latest one before signing.
pub fn sign_with_blockhash(
    transaction: VersionedTransaction,
    blockhash: Hash,
    keypair: &Keypair,
) -> Result<VersionedTransaction> {
    let mut message = transaction.message;
    message.set_recent_blockhash(blockhash);

    VersionedTransaction::try_new(message, &[keypair])
        .map_err(|e| anyhow!("Failed to sign transaction: {}", e))
}

/// Rebuild an aggregator transaction as an unsigned payload for the
/// custodial signer.
///
/// The custodial API recomputes payer and blockhash server-side for MPC
/// wallets, so the rebuilt message carries the system program as a
/// placeholder payer and an all-zero placeholder blockhash. The instructions
/// extracted from the original message are carried over; the message must be
/// legacy-format so the full static account list is available.
///
/// Returns the base58 text encoding the custodial API expects.
pub fn rebuild_for_custodial_signing(transaction: &VersionedTransaction) -> Result<String> {
    let message = match &transaction.message {
        VersionedMessage::Legacy(message) => message,
        VersionedMessage::V0(_) => {
            bail!("Custodial rebuild requires a legacy-format transaction")
        }
    };

    let instructions = decompile_instructions(message)?;
    let rebuilt = Message::new_with_blockhash(
        &instructions,
        Some(&system_program::id()),
        &Hash::default(),
    );

    let unsigned = Transaction::new_unsigned(rebuilt);
    let serialized =
        bincode::serialize(&unsigned).map_err(|e| anyhow!("Failed to serialize transaction: {}", e))?;

    Ok(bs58::encode(serialized).into_string())
}

/// Expand a legacy message's compiled instructions back into full
/// instructions with resolved program ids and account metas.
///
/// The header is validated first: bincode enforces none of the message
/// invariants, so readonly counts in a malformed upstream payload can exceed
/// the signer or account counts.
fn decompile_instructions(message: &Message) -> Result<Vec<Instruction>> {
    let header = &message.header;
    let num_signed = header.num_required_signatures as usize;
    if header.num_readonly_signed_accounts as usize > num_signed
        || num_signed + header.num_readonly_unsigned_accounts as usize
            > message.account_keys.len()
    {
        bail!("Malformed message header: readonly counts exceed account list");
    }

    let account_at = |index: usize| {
        message
            .account_keys
            .get(index)
            .copied()
            .ok_or_else(|| anyhow!("Instruction references account index {} out of bounds", index))
    };

    message
        .instructions
        .iter()
        .map(|compiled| {
            let program_id = account_at(compiled.program_id_index as usize)?;

            let accounts = compiled
                .accounts
                .iter()
                .map(|&index| {
                    let index = index as usize;
                    Ok(AccountMeta {
                        pubkey: account_at(index)?,
                        is_signer: is_signer(message, index),
                        is_writable: is_writable(message, index),
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            Ok(Instruction::new_with_bytes(
                program_id,
                &compiled.data,
                accounts,
            ))
        })
        .collect()
}

fn is_signer(message: &Message, index: usize) -> bool {
    index < message.header.num_required_signatures as usize
}

fn is_writable(message: &Message, index: usize) -> bool {
    let header = &message.header;
    let num_signed = header.num_required_signatures as usize;

    if index < num_signed {
        index < num_signed - header.num_readonly_signed_accounts as usize
    } else {
        index < message.account_keys.len() - header.num_readonly_unsigned_accounts as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::message::v0::Message as MessageV0;
    use solana_sdk::pubkey::Pubkey;
    use solana_sdk::signature::Signature;
    use solana_sdk::signer::Signer;
    use solana_sdk::system_instruction;

    fn legacy_swap_payload(payer: &Pubkey) -> (String, Pubkey) {
        let recipient = Pubkey::new_unique();
        let instruction = system_instruction::transfer(payer, &recipient, 1_000);
        let message = Message::new_with_blockhash(&[instruction], Some(payer), &Hash::new_unique());

        let transaction = VersionedTransaction {
            signatures: vec![Signature::default(); message.header.num_required_signatures as usize],
            message: VersionedMessage::Legacy(message),
        };

        let payload = general_purpose::STANDARD.encode(bincode::serialize(&transaction).unwrap());
        (payload, recipient)
    }

    #[test]
    fn decodes_base64_bincode_payload() {
        let payer = Pubkey::new_unique();
        let (payload, _) = legacy_swap_payload(&payer);

        let decoded = decode_swap_transaction(&payload).unwrap();
        assert_eq!(decoded.message.static_account_keys()[0], payer);
    }

    #[test]
    fn rejects_garbage_payloads() {
        assert!(decode_swap_transaction("not-base64!").is_err());

        let valid_b64_invalid_tx = general_purpose::STANDARD.encode([1u8, 2, 3]);
        assert!(decode_swap_transaction(&valid_b64_invalid_tx).is_err());
    }

    #[test]
    fn signing_applies_fresh_blockhash() {
        let keypair = Keypair::new();
        let (payload, _) = legacy_swap_payload(&keypair.pubkey());
        let decoded = decode_swap_transaction(&payload).unwrap();

        let blockhash = Hash::new_unique();
        let signed = sign_with_blockhash(decoded, blockhash, &keypair).unwrap();

        assert_eq!(*signed.message.recent_blockhash(), blockhash);
        assert!(signed.verify_and_hash_message().is_ok());
    }

    #[test]
    fn signing_works_for_v0_messages() {
        let keypair = Keypair::new();
        let instruction =
            system_instruction::transfer(&keypair.pubkey(), &Pubkey::new_unique(), 500);
        let message = MessageV0::try_compile(
            &keypair.pubkey(),
            &[instruction],
            &[],
            Hash::new_unique(),
        )
        .unwrap();

        let transaction = VersionedTransaction {
            signatures: vec![Signature::default()],
            message: VersionedMessage::V0(message),
        };

        let blockhash = Hash::new_unique();
        let signed = sign_with_blockhash(transaction, blockhash, &keypair).unwrap();

        assert_eq!(*signed.message.recent_blockhash(), blockhash);
    }

    #[test]
    fn custodial_rebuild_substitutes_placeholders_and_keeps_instructions() {
        let payer = Pubkey::new_unique();
        let (payload, recipient) = legacy_swap_payload(&payer);
        let decoded = decode_swap_transaction(&payload).unwrap();

        let encoded = rebuild_for_custodial_signing(&decoded).unwrap();

        let bytes = bs58::decode(&encoded).into_vec().unwrap();
        let rebuilt: Transaction = bincode::deserialize(&bytes).unwrap();

        // Placeholder payer and blockhash; Crossmint recomputes both.
        assert_eq!(rebuilt.message.account_keys[0], system_program::id());
        assert_eq!(rebuilt.message.recent_blockhash, Hash::default());

        // The transfer instruction survived the rebuild.
        assert_eq!(rebuilt.message.instructions.len(), 1);
        assert!(rebuilt.message.account_keys.contains(&recipient));

        // Unsigned: default signature slots only.
        assert!(rebuilt.signatures.iter().all(|s| *s == Signature::default()));
    }

    #[test]
    fn custodial_rebuild_rejects_corrupt_message_headers() {
        use solana_sdk::instruction::CompiledInstruction;
        use solana_sdk::message::MessageHeader;

        // Readonly signer count larger than the signer count.
        let corrupt = Message {
            header: MessageHeader {
                num_required_signatures: 1,
                num_readonly_signed_accounts: 3,
                num_readonly_unsigned_accounts: 0,
            },
            account_keys: vec![Pubkey::new_unique(), Pubkey::new_unique()],
            recent_blockhash: Hash::new_unique(),
            instructions: vec![CompiledInstruction {
                program_id_index: 1,
                accounts: vec![0],
                data: vec![],
            }],
        };
        let transaction = VersionedTransaction {
            signatures: vec![Signature::default()],
            message: VersionedMessage::Legacy(corrupt),
        };
        let err = rebuild_for_custodial_signing(&transaction).unwrap_err();
        assert!(err.to_string().contains("Malformed message header"));

        // Readonly unsigned count larger than the unsigned account tail.
        let corrupt = Message {
            header: MessageHeader {
                num_required_signatures: 1,
                num_readonly_signed_accounts: 0,
                num_readonly_unsigned_accounts: 5,
            },
            account_keys: vec![Pubkey::new_unique(), Pubkey::new_unique()],
            recent_blockhash: Hash::new_unique(),
            instructions: vec![CompiledInstruction {
                program_id_index: 1,
                accounts: vec![0],
                data: vec![],
            }],
        };
        let transaction = VersionedTransaction {
            signatures: vec![Signature::default()],
            message: VersionedMessage::Legacy(corrupt),
        };
        let err = rebuild_for_custodial_signing(&transaction).unwrap_err();
        assert!(err.to_string().contains("Malformed message header"));
    }

    #[test]
    fn custodial_rebuild_rejects_v0_messages() {
        let keypair = Keypair::new();
        let instruction =
            system_instruction::transfer(&keypair.pubkey(), &Pubkey::new_unique(), 500);
        let message = MessageV0::try_compile(
            &keypair.pubkey(),
            &[instruction],
            &[],
            Hash::new_unique(),
        )
        .unwrap();

        let transaction = VersionedTransaction {
            signatures: vec![Signature::default()],
            message: VersionedMessage::V0(message),
        };

        let err = rebuild_for_custodial_signing(&transaction).unwrap_err();
        assert!(err.to_string().contains("legacy-format"));
    }
}
