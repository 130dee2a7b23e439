//! # The Token Contract
//!
//! The orchestration layer tying the ledger, registration table, and
//! metadata store together behind the standard call surface. This is the
//! only module that reads [`CallContext`] — everything below it works on
//! plain accounts and amounts.
//!
//! ## Transfer protocol
//!
//! A simple transfer is one synchronous state transition: validate, debit
//! sender, credit receiver, emit. The extended variant is a two-phase state
//! machine (`Initiated -> Debited -> NotifyPending -> {Settled | Refunding
//! -> Settled}`):
//!
//! 1. [`ft_transfer_call`](Contract::ft_transfer_call) applies the same
//!    debit/credit optimistically and hands the platform a
//!    [`PendingTransfer`].
//! 2. The platform notifies the receiver's contract and feeds the result —
//!    a declared used-amount or an outright failure — back into
//!    [`ft_resolve_transfer`](Contract::ft_resolve_transfer), which moves
//!    any unused remainder back to the sender.
//!
//! Once phase one commits there is no rollback, only reconciliation: a
//! receiver that already spent the funds yields a truncated, best-effort
//! refund, recorded as a warning event rather than an error.
//!
//! ## Concurrency
//!
//! The platform serializes calls to a contract instance, so `&mut self` is
//! the whole concurrency story. The resolve phase re-reads the receiver's
//! live balance rather than trusting phase-one numbers — the receiver may
//! have moved funds between the phases, and reconciliation has to be
//! correct against whatever the book says *now*.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::account::AccountId;
use crate::config::{storage_bond, GAS_FLOOR_FOR_TRANSFER_CALL};
use crate::context::CallContext;
use crate::error::TokenError;
use crate::events;
use crate::ledger::Ledger;
use crate::metadata::TokenMetadata;
use crate::receiver::{PendingTransfer, ReceiverOutcome, SettledTransfer};
use crate::storage::{
    StorageBalance, StorageBalanceBounds, StorageDepositOutcome, StorageWithdrawOutcome,
    UnregisterOutcome,
};

/// The fungible token contract: balances, registrations, metadata, and the
/// fixed total supply, as one serializable state object. The host owns
/// exactly one of these and routes every inbound call to a method here.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Contract {
    /// The account this contract is deployed at. Doubles as the custodial
    /// account absorbing force-unregistered balances.
    contract_id: AccountId,

    /// The account that received the initial supply.
    owner_id: AccountId,

    /// Fixed at init, read-only forever after.
    metadata: TokenMetadata,

    /// The balance book. Entry presence is registration.
    ledger: Ledger,
}

impl Contract {
    // -----------------------------------------------------------------------
    // Initialization
    // -----------------------------------------------------------------------

    /// Initializes the contract: validates the metadata, fixes the total
    /// supply, registers the owner and the contract's own custodial account
    /// (both bond-free — the contract underwrites its genesis storage), and
    /// credits the owner with the entire supply.
    ///
    /// Exactly-once semantics are enforced by [`ContractCell`], the one-slot
    /// store the host keeps this state in.
    ///
    /// [`ContractCell`]: crate::cell::ContractCell
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidMetadata`] if the metadata record fails
    /// validation.
    pub fn new(
        ctx: &CallContext,
        owner_id: AccountId,
        total_supply: u128,
        metadata: TokenMetadata,
    ) -> Result<Self, TokenError> {
        metadata.validate()?;

        let contract_id = ctx.contract_id().clone();
        let mut ledger = Ledger::new(total_supply);
        ledger.register(&contract_id, 0);
        ledger.register(&owner_id, 0);
        ledger.internal_deposit(&owner_id, total_supply)?;

        events::FtMint {
            owner_id: &owner_id,
            amount: total_supply,
            memo: Some("initial supply minted at deployment"),
        }
        .emit();

        tracing::info!(
            contract = %contract_id,
            owner = %owner_id,
            total_supply,
            symbol = %metadata.symbol,
            "token contract initialized"
        );

        Ok(Self {
            contract_id,
            owner_id,
            metadata,
            ledger,
        })
    }

    // -----------------------------------------------------------------------
    // Read-only views
    // -----------------------------------------------------------------------

    /// The fixed total supply.
    pub fn ft_total_supply(&self) -> u128 {
        self.ledger.total_supply()
    }

    /// The account's balance, or `None` if it isn't registered. `Some(0)`
    /// and `None` are different answers and callers rely on that.
    pub fn ft_balance_of(&self, account_id: &AccountId) -> Option<u128> {
        self.ledger.balance_of(account_id)
    }

    /// The immutable metadata record.
    pub fn ft_metadata(&self) -> TokenMetadata {
        self.metadata.clone()
    }

    /// The account this contract is deployed at.
    pub fn contract_id(&self) -> &AccountId {
        &self.contract_id
    }

    /// The initial-supply owner.
    pub fn owner_id(&self) -> &AccountId {
        &self.owner_id
    }

    /// Read access to the underlying ledger, for hosts and tests.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    // -----------------------------------------------------------------------
    // Transfer protocol
    // -----------------------------------------------------------------------

    /// Transfers `amount` from the caller to `receiver_id`.
    ///
    /// The debit is self-initiated only: the sender IS the authenticated
    /// caller in the context, so there is no delegated-transfer surface to
    /// validate. Requires the exactly-one-lux payment guard.
    ///
    /// # Errors
    ///
    /// [`TokenError::Unauthorized`] (payment guard),
    /// [`TokenError::SelfTransfer`], [`TokenError::ZeroAmount`],
    /// [`TokenError::ReceiverNotRegistered`],
    /// [`TokenError::NotRegistered`] (sender),
    /// [`TokenError::InsufficientBalance`]. Every failure leaves both
    /// balances untouched.
    pub fn ft_transfer(
        &mut self,
        ctx: &CallContext,
        receiver_id: &AccountId,
        amount: u128,
        memo: Option<&str>,
    ) -> Result<(), TokenError> {
        ctx.require_one_lux()?;
        self.internal_transfer(ctx.predecessor_id(), receiver_id, amount, memo)
    }

    /// Phase one of the extended transfer: validates, applies the
    /// debit/credit optimistically, and returns the [`PendingTransfer`] the
    /// platform must carry across the receiver notification and hand back
    /// to [`ft_resolve_transfer`](Self::ft_resolve_transfer).
    ///
    /// Beyond the simple-transfer checks this requires a non-empty `msg`
    /// (the receiver dispatches on it) and enough prepaid gas that the
    /// resolve phase is guaranteed to run after the notification call has
    /// taken its share.
    pub fn ft_transfer_call(
        &mut self,
        ctx: &CallContext,
        receiver_id: &AccountId,
        amount: u128,
        memo: Option<&str>,
        msg: &str,
    ) -> Result<PendingTransfer, TokenError> {
        ctx.require_one_lux()?;
        if msg.is_empty() {
            return Err(TokenError::EmptyMessage);
        }
        if ctx.prepaid_gas() < GAS_FLOOR_FOR_TRANSFER_CALL {
            return Err(TokenError::InsufficientGas {
                prepaid: ctx.prepaid_gas(),
                required: GAS_FLOOR_FOR_TRANSFER_CALL,
            });
        }

        self.internal_transfer(ctx.predecessor_id(), receiver_id, amount, memo)?;

        let pending = PendingTransfer {
            id: Uuid::new_v4(),
            sender_id: ctx.predecessor_id().clone(),
            receiver_id: receiver_id.clone(),
            amount,
            memo: memo.map(str::to_owned),
            msg: msg.to_owned(),
            issued_at: chrono::Utc::now(),
        };

        tracing::info!(
            transfer = %pending.id,
            sender = %pending.sender_id,
            receiver = %pending.receiver_id,
            amount,
            "extended transfer debited, notification pending"
        );

        Ok(pending)
    }

    /// Phase two of the extended transfer: reconciles the optimistic
    /// debit/credit against what the receiver declared it used.
    ///
    /// Only the platform may call this — it arrives as a self-call after
    /// the notification completes. The unused remainder moves back
    /// receiver → sender, clamped to what the receiver still holds; if the
    /// receiver spent or forwarded the funds between the phases, the refund
    /// is best-effort and a warning event records the shortfall. A sender
    /// that unregistered mid-flight can't be refunded, so the remainder is
    /// swept to the custodial account instead.
    ///
    /// Returns the amount that actually stayed transferred.
    pub fn ft_resolve_transfer(
        &mut self,
        ctx: &CallContext,
        pending: &PendingTransfer,
        outcome: ReceiverOutcome,
    ) -> Result<SettledTransfer, TokenError> {
        ctx.require_self_call()?;

        let declared_used = match outcome {
            // A receiver can't use more than it was given, whatever it says.
            ReceiverOutcome::Used(used) => used.min(pending.amount),
            ReceiverOutcome::Failed => 0,
        };
        let refund_due = pending.amount - declared_used;

        if refund_due == 0 {
            tracing::info!(transfer = %pending.id, used = pending.amount, "extended transfer settled, nothing to refund");
            return Ok(SettledTransfer {
                transfer_id: pending.id,
                used: pending.amount,
                refunded: 0,
                refund_truncated: false,
            });
        }

        // Re-read the live balance: the receiver may have spent, forwarded,
        // or force-unregistered since phase one.
        let receiver_holds = self
            .ledger
            .balance_of(&pending.receiver_id)
            .unwrap_or(0);
        let refund = refund_due.min(receiver_holds);
        let truncated = refund < refund_due;

        if refund > 0 {
            self.ledger.internal_withdraw(&pending.receiver_id, refund)?;

            let refund_to = if self.ledger.is_registered(&pending.sender_id) {
                &pending.sender_id
            } else {
                tracing::warn!(
                    transfer = %pending.id,
                    sender = %pending.sender_id,
                    "refund sender unregistered mid-flight, sweeping to custodial account"
                );
                &self.contract_id
            };
            let refund_to = refund_to.clone();
            self.ledger.internal_deposit(&refund_to, refund)?;

            events::FtTransfer {
                old_owner_id: &pending.receiver_id,
                new_owner_id: &refund_to,
                amount: refund,
                memo: Some("refund"),
            }
            .emit();
        }

        if truncated {
            events::RefundTruncated {
                sender_id: &pending.sender_id,
                receiver_id: &pending.receiver_id,
                requested: refund_due,
                refunded: refund,
            }
            .emit();
        }

        let settled = SettledTransfer {
            transfer_id: pending.id,
            used: pending.amount - refund,
            refunded: refund,
            refund_truncated: truncated,
        };
        tracing::info!(
            transfer = %settled.transfer_id,
            used = settled.used,
            refunded = settled.refunded,
            truncated = settled.refund_truncated,
            "extended transfer settled"
        );
        Ok(settled)
    }

    /// The shared debit/credit path. One state transition: all validation
    /// happens before the first mutation, so a failure leaves the book
    /// exactly as it was.
    fn internal_transfer(
        &mut self,
        sender_id: &AccountId,
        receiver_id: &AccountId,
        amount: u128,
        memo: Option<&str>,
    ) -> Result<(), TokenError> {
        if sender_id == receiver_id {
            return Err(TokenError::SelfTransfer);
        }
        if amount == 0 {
            return Err(TokenError::ZeroAmount);
        }
        if !self.ledger.is_registered(receiver_id) {
            return Err(TokenError::ReceiverNotRegistered(receiver_id.clone()));
        }

        self.ledger.internal_withdraw(sender_id, amount)?;
        // Cannot fail: the receiver is registered, and conservation caps
        // every balance at total_supply once the sender's debit landed.
        self.ledger.internal_deposit(receiver_id, amount)?;

        events::FtTransfer {
            old_owner_id: sender_id,
            new_owner_id: receiver_id,
            amount,
            memo,
        }
        .emit();

        Ok(())
    }

    // -----------------------------------------------------------------------
    // Storage registration
    // -----------------------------------------------------------------------

    /// The fixed bond quote. `min == max`: extra is always refunded.
    pub fn storage_balance_bounds(&self) -> StorageBalanceBounds {
        StorageBalanceBounds::default()
    }

    /// The account's storage position, or `None` if it isn't registered.
    pub fn storage_balance_of(&self, account_id: &AccountId) -> Option<StorageBalance> {
        self.ledger
            .entry_of(account_id)
            .map(|entry| StorageBalance::for_bond(entry.bond))
    }

    /// Registers `account_id` (the caller, if omitted) by taking the bond
    /// out of the attached payment.
    ///
    /// Idempotent on re-registration: a second deposit for an already
    /// registered account changes nothing and refunds the full attached
    /// payment. For a new registration, anything attached above the bond is
    /// refunded. `registration_only` is accepted for interface
    /// compatibility; with a fixed bond both modes keep exactly the bond
    /// and refund the rest, so it only shows up in the logs.
    ///
    /// # Errors
    ///
    /// [`TokenError::InsufficientDeposit`] if the attached payment doesn't
    /// cover the bond for a new registration.
    pub fn storage_deposit(
        &mut self,
        ctx: &CallContext,
        account_id: Option<&AccountId>,
        registration_only: Option<bool>,
    ) -> Result<StorageDepositOutcome, TokenError> {
        let account = account_id.unwrap_or_else(|| ctx.predecessor_id()).clone();
        let attached = ctx.attached_deposit();

        if let Some(entry) = self.ledger.entry_of(&account) {
            tracing::debug!(
                account = %account,
                refund = attached,
                "storage_deposit for already-registered account, refunding in full"
            );
            return Ok(StorageDepositOutcome {
                balance: StorageBalance::for_bond(entry.bond),
                refund: attached,
                newly_registered: false,
            });
        }

        let bond = storage_bond();
        if attached < bond {
            return Err(TokenError::InsufficientDeposit {
                available: attached,
                required: bond,
            });
        }

        self.ledger.register(&account, bond);
        events::StorageRegister {
            account_id: &account,
            bond,
        }
        .emit();
        tracing::debug!(
            account = %account,
            bond,
            registration_only = ?registration_only,
            "account registered"
        );

        Ok(StorageDepositOutcome {
            balance: StorageBalance::for_bond(bond),
            refund: attached - bond,
            newly_registered: true,
        })
    }

    /// Pays out storage funds above the bond. The fixed-bond design never
    /// holds anything above the bond, so `available` is zero and any
    /// positive `amount` fails; `None` means "everything available" and
    /// succeeds vacuously. Requires the one-lux payment guard.
    ///
    /// # Errors
    ///
    /// [`TokenError::NotRegistered`] if the caller has no entry.
    /// [`TokenError::InsufficientDeposit`] if `amount` exceeds the
    /// available (zero) storage funds.
    pub fn storage_withdraw(
        &mut self,
        ctx: &CallContext,
        amount: Option<u128>,
    ) -> Result<StorageWithdrawOutcome, TokenError> {
        ctx.require_one_lux()?;
        let account = ctx.predecessor_id();
        let balance = self
            .storage_balance_of(account)
            .ok_or_else(|| TokenError::NotRegistered(account.clone()))?;

        let requested = amount.unwrap_or(balance.available);
        if requested > balance.available {
            return Err(TokenError::InsufficientDeposit {
                available: balance.available,
                required: requested,
            });
        }

        Ok(StorageWithdrawOutcome {
            balance,
            paid_out: requested,
        })
    }

    /// Removes the caller from the registration set and releases the bond.
    ///
    /// An account still holding tokens must pass `force`, which sweeps the
    /// remaining balance into the contract's custodial account — the swept
    /// amount stays inside the fixed supply, it just stops belonging to the
    /// departing account. The custodial account itself can never be
    /// unregistered. Requires the one-lux payment guard.
    ///
    /// # Errors
    ///
    /// [`TokenError::NotRegistered`], [`TokenError::NonZeroBalance`]
    /// (without `force`), [`TokenError::Unauthorized`] (custodial account,
    /// or payment guard).
    pub fn storage_unregister(
        &mut self,
        ctx: &CallContext,
        force: bool,
    ) -> Result<UnregisterOutcome, TokenError> {
        ctx.require_one_lux()?;
        let account = ctx.predecessor_id().clone();

        if account == self.contract_id {
            return Err(TokenError::Unauthorized {
                reason: "the contract's custodial account cannot be unregistered".into(),
            });
        }

        let balance = self
            .ledger
            .balance_of(&account)
            .ok_or_else(|| TokenError::NotRegistered(account.clone()))?;

        if balance > 0 && !force {
            return Err(TokenError::NonZeroBalance { account, balance });
        }

        if balance > 0 {
            // Sweep while both entries still exist, then drop the account.
            self.ledger.internal_withdraw(&account, balance)?;
            self.ledger.internal_deposit(&self.contract_id, balance)?;
            events::FtTransfer {
                old_owner_id: &account,
                new_owner_id: &self.contract_id,
                amount: balance,
                memo: Some("forced unregister sweep"),
            }
            .emit();
        }

        let entry = self
            .ledger
            .unregister(&account)
            .ok_or_else(|| TokenError::NotRegistered(account.clone()))?;

        events::StorageUnregister {
            account_id: &account,
            bond_refund: entry.bond,
            swept_balance: balance,
        }
        .emit();
        tracing::info!(
            account = %account,
            bond_refund = entry.bond,
            swept = balance,
            "account unregistered"
        );

        Ok(UnregisterOutcome {
            bond_refund: entry.bond,
            swept_balance: balance,
        })
    }
}
